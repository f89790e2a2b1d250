use std::cmp::Ordering;

use serde::Serialize;
use thiserror::Error;

use crate::normalize::location_key;
use crate::spec::RequirementSpec;
use crate::Candidate;

use super::filters::{run_all_filters, FilterReport};

#[derive(Debug, Error)]
#[error("evaluation failed: {0}")]
pub struct EvaluateError(pub String);

/// One surviving candidate with its relevance score and the per-dimension
/// decisions that let the UI explain the match.
#[derive(Debug, Clone)]
pub struct CandidateMatch {
    pub candidate: Candidate,
    pub score: MatchScore,
    pub report: FilterReport,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MatchScore {
    pub skills: f64,
    pub location: f64,
    pub total: f64,
}

const SKILL_WEIGHT: f64 = 0.7;
const LOCATION_WEIGHT: f64 = 0.3;

impl MatchScore {
    fn compute(spec: &RequirementSpec, candidate: &Candidate) -> Self {
        let skills = if spec.include_skills.is_empty() {
            1.0
        } else {
            let wanted: Vec<String> = spec
                .include_skills
                .iter()
                .map(|s| s.to_lowercase())
                .collect();
            let possessed: Vec<String> =
                candidate.skills.iter().map(|s| s.to_lowercase()).collect();
            let matched = wanted.iter().filter(|s| possessed.contains(s)).count();
            matched as f64 / wanted.len() as f64
        };

        let location = if !spec.has_location_filter() {
            1.0
        } else {
            match candidate.location.as_deref().map(location_key) {
                Some(key)
                    if spec
                        .include_locations
                        .iter()
                        .any(|l| location_key(l) == key) =>
                {
                    1.0
                }
                // Survivors outside the include set got here via the
                // relocation allowance (or missing data admitted by the
                // spec); rank them below direct matches.
                _ => 0.7,
            }
        };

        Self {
            skills,
            location,
            total: SKILL_WEIGHT * skills + LOCATION_WEIGHT * location,
        }
    }
}

/// The query interface a finalized spec is handed to. The production
/// implementation lives in the search backend; `MatchingEngine` below is
/// the in-process reference used for immediate feedback and tests.
pub trait Evaluator {
    fn evaluate(&self, spec: &RequirementSpec) -> Result<Vec<CandidateMatch>, EvaluateError>;
}

/// Reference evaluator over an in-memory candidate pool.
pub struct MatchingEngine {
    pool: Vec<Candidate>,
}

impl MatchingEngine {
    pub fn new(pool: Vec<Candidate>) -> Self {
        Self { pool }
    }

    /// Filter the pool by every spec dimension, score the survivors and
    /// order them: score descending, ties broken by ascending candidate id
    /// so repeated identical queries paginate identically.
    pub fn rank(&self, spec: &RequirementSpec) -> Vec<CandidateMatch> {
        rank_candidates(spec, &self.pool)
    }
}

impl Evaluator for MatchingEngine {
    fn evaluate(&self, spec: &RequirementSpec) -> Result<Vec<CandidateMatch>, EvaluateError> {
        Ok(self.rank(spec))
    }
}

pub fn rank_candidates(spec: &RequirementSpec, candidates: &[Candidate]) -> Vec<CandidateMatch> {
    let mut matches: Vec<CandidateMatch> = candidates
        .iter()
        .filter_map(|candidate| {
            let report = run_all_filters(spec, candidate);
            if report.excluded {
                return None;
            }
            Some(CandidateMatch {
                score: MatchScore::compute(spec, candidate),
                candidate: candidate.clone(),
                report,
            })
        })
        .collect();

    matches.sort_by(|a, b| {
        match b
            .score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => a.candidate.id.cmp(&b.candidate.id),
            other => other,
        }
    });

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::RequirementBuilder;
    use crate::vocab::Region;

    fn spec_with(mutator: impl FnOnce(&mut RequirementBuilder)) -> RequirementSpec {
        let mut builder = RequirementBuilder::new(Region::Default);
        builder.set_title("Platform Engineer");
        builder.set_description("Search infrastructure.");
        builder.set_job_location("Dubai");
        mutator(&mut builder);
        builder.finalize().unwrap()
    }

    fn candidate(id: i64, skills: &[&str], location: &str) -> Candidate {
        Candidate {
            id,
            skills: skills.iter().map(|s| s.to_string()).collect(),
            location: Some(location.to_string()),
            ..Candidate::default()
        }
    }

    #[test]
    fn ranks_by_skill_coverage() {
        let spec = spec_with(|b| {
            b.add_include_skill("rust");
            b.add_include_skill("postgres");
        });

        let pool = vec![
            candidate(1, &["Rust"], "Dubai"),
            candidate(2, &["Rust", "Postgres"], "Dubai"),
        ];

        let ranked = MatchingEngine::new(pool).rank(&spec);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.id, 2);
        assert!(ranked[0].score.total > ranked[1].score.total);
    }

    #[test]
    fn ties_break_by_candidate_id() {
        let spec = spec_with(|b| b.add_include_skill("rust"));

        let pool = vec![
            candidate(9, &["Rust"], "Dubai"),
            candidate(3, &["Rust"], "Dubai"),
            candidate(7, &["Rust"], "Dubai"),
        ];

        let ranked = MatchingEngine::new(pool).rank(&spec);
        let ids: Vec<i64> = ranked.iter().map(|m| m.candidate.id).collect();
        assert_eq!(ids, vec![3, 7, 9]);
    }

    #[test]
    fn excluded_candidates_never_surface() {
        let spec = spec_with(|b| {
            b.add_include_skill("rust");
            b.add_exclude_skill("cobol");
        });

        let pool = vec![
            candidate(1, &["Rust", "Cobol"], "Dubai"),
            candidate(2, &["Rust"], "Dubai"),
        ];

        let ranked = MatchingEngine::new(pool).rank(&spec);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].candidate.id, 2);
    }

    #[test]
    fn relocatable_matches_rank_below_local_ones() {
        let spec = spec_with(|b| {
            b.add_include_skill("rust");
            b.set_include_willing_to_relocate(true);
        });

        let mut remote = candidate(1, &["Rust"], "Cairo");
        remote.willing_to_relocate = true;
        let local = candidate(2, &["Rust"], "Dubai");

        let ranked = MatchingEngine::new(vec![remote, local]).rank(&spec);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].candidate.id, 2);
        assert!(ranked[0].score.location > ranked[1].score.location);
    }

    #[test]
    fn identical_queries_return_identical_order() {
        let spec = spec_with(|b| b.add_include_skill("rust"));
        let pool: Vec<Candidate> = (0..20)
            .map(|i| candidate(20 - i, &["Rust"], "Dubai"))
            .collect();

        let engine = MatchingEngine::new(pool);
        let first: Vec<i64> = engine.rank(&spec).iter().map(|m| m.candidate.id).collect();
        let second: Vec<i64> = engine.rank(&spec).iter().map(|m| m.candidate.id).collect();
        assert_eq!(first, second);
    }
}
