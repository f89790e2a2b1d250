use crate::normalize::location_key;
use crate::spec::RequirementSpec;
use crate::vocab::DiversityTag;
use crate::Candidate;

/// Outcome of one filter dimension for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterDecision {
    /// Filter satisfied (or not active).
    Pass,

    /// Filter violated; always excludes.
    Reject { reason: String },

    /// The candidate record has no value for the filtered field. Whether
    /// this excludes is decided per spec via `include_not_mentioned`.
    Unknown { reason: String },
}

impl FilterDecision {
    pub fn is_reject(&self) -> bool {
        matches!(self, FilterDecision::Reject { .. })
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, FilterDecision::Unknown { .. })
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            FilterDecision::Reject { reason } | FilterDecision::Unknown { reason } => Some(reason),
            FilterDecision::Pass => None,
        }
    }
}

/// All filter decisions for one candidate, with the exclusion verdict
/// already resolved against `include_not_mentioned`.
#[derive(Debug, Clone)]
pub struct FilterReport {
    pub decisions: Vec<(&'static str, FilterDecision)>,
    pub excluded: bool,
}

impl FilterReport {
    pub fn new(decisions: Vec<(&'static str, FilterDecision)>, include_not_mentioned: bool) -> Self {
        let excluded = decisions.iter().any(|(_, d)| d.is_reject())
            || (!include_not_mentioned && decisions.iter().any(|(_, d)| d.is_unknown()));

        Self { decisions, excluded }
    }

    /// Display reasons for every non-passing dimension.
    pub fn reasons(&self) -> Vec<String> {
        self.decisions
            .iter()
            .filter_map(|(name, d)| d.reason().map(|r| format!("[{name}] {r}")))
            .collect()
    }
}

/// Runs every filter dimension of a finalized spec against one candidate.
pub fn run_all_filters(spec: &RequirementSpec, candidate: &Candidate) -> FilterReport {
    let decisions = vec![
        ("include_skills", check_include_skills(spec, candidate)),
        ("exclude_skills", check_exclude_skills(spec, candidate)),
        ("location", check_location(spec, candidate)),
        ("experience", check_experience(spec, candidate)),
        ("salary", check_salary(spec, candidate)),
        (
            "education",
            check_text_equals(
                "education",
                spec.education.as_deref(),
                candidate.education.as_deref(),
            ),
        ),
        (
            "industry",
            check_text_equals(
                "industry",
                spec.industry.as_deref(),
                candidate.industry.as_deref(),
            ),
        ),
        (
            "department",
            check_text_equals(
                "department",
                spec.department.as_deref(),
                candidate.department.as_deref(),
            ),
        ),
        ("designation", check_designation(spec, candidate)),
        (
            "current_company",
            check_text_contains(
                "current_company",
                spec.current_company.as_deref(),
                candidate.current_company.as_deref(),
            ),
        ),
        (
            "institute",
            check_text_contains(
                "institute",
                spec.institute.as_deref(),
                candidate.institute.as_deref(),
            ),
        ),
        ("notice_period", check_notice_period(spec, candidate)),
        ("remote_work", check_remote_work(spec, candidate)),
        ("travel", check_travel(spec, candidate)),
        ("resume_freshness", check_resume_freshness(spec, candidate)),
        ("last_active", check_last_active(spec, candidate)),
        ("diversity", check_diversity(spec, candidate)),
    ];

    FilterReport::new(decisions, spec.include_not_mentioned)
}

fn lower_set(values: &[String]) -> Vec<String> {
    values.iter().map(|v| v.trim().to_lowercase()).collect()
}

/// Candidates matching none of the include skills are out; an empty
/// include set means no skill filter at all.
fn check_include_skills(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    if spec.include_skills.is_empty() {
        return FilterDecision::Pass;
    }
    if candidate.skills.is_empty() {
        return FilterDecision::Unknown {
            reason: "skills_missing: candidate lists no skills".into(),
        };
    }

    let wanted = lower_set(&spec.include_skills);
    let possessed = lower_set(&candidate.skills);
    let matched = wanted.iter().filter(|s| possessed.contains(s)).count();

    if matched == 0 {
        FilterDecision::Reject {
            reason: format!(
                "skill_mismatch: none of {} required skills present",
                wanted.len()
            ),
        }
    } else {
        FilterDecision::Pass
    }
}

/// Exclude always wins: one blacklisted skill rejects regardless of how
/// well the rest of the profile matches.
fn check_exclude_skills(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    if spec.exclude_skills.is_empty() || candidate.skills.is_empty() {
        return FilterDecision::Pass;
    }

    let banned = lower_set(&spec.exclude_skills);
    let possessed = lower_set(&candidate.skills);

    match possessed.iter().find(|s| banned.contains(s)) {
        Some(skill) => FilterDecision::Reject {
            reason: format!("excluded_skill: candidate has {skill}"),
        },
        None => FilterDecision::Pass,
    }
}

/// Single location verdict: exclude-location beats willing-to-relocate,
/// willing-to-relocate rescues an include miss, empty include set means
/// no location filter.
fn check_location(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    let candidate_key = candidate.location.as_deref().map(location_key);

    if let Some(key) = &candidate_key {
        if spec
            .exclude_locations
            .iter()
            .any(|l| location_key(l) == *key)
        {
            return FilterDecision::Reject {
                reason: format!(
                    "excluded_location: {}",
                    candidate.location.as_deref().unwrap_or_default()
                ),
            };
        }
    }

    if !spec.has_location_filter() {
        return FilterDecision::Pass;
    }

    let Some(key) = candidate_key else {
        return FilterDecision::Unknown {
            reason: "location_missing: candidate location not mentioned".into(),
        };
    };

    if spec
        .include_locations
        .iter()
        .any(|l| location_key(l) == key)
    {
        return FilterDecision::Pass;
    }

    if spec.include_willing_to_relocate && candidate.willing_to_relocate {
        return FilterDecision::Pass;
    }

    FilterDecision::Reject {
        reason: format!(
            "location_mismatch: {} outside the searched locations",
            candidate.location.as_deref().unwrap_or_default()
        ),
    }
}

fn check_range(
    field: &str,
    min: Option<f64>,
    max: Option<f64>,
    value: Option<f64>,
) -> FilterDecision {
    if min.is_none() && max.is_none() {
        return FilterDecision::Pass;
    }

    let Some(value) = value else {
        return FilterDecision::Unknown {
            reason: format!("{field}_missing: value not mentioned"),
        };
    };

    // Inclusive on both ends; a missing bound is unbounded on that side.
    if min.is_some_and(|m| value < m) || max.is_some_and(|m| value > m) {
        return FilterDecision::Reject {
            reason: format!("{field}_out_of_range: {value}"),
        };
    }

    FilterDecision::Pass
}

fn check_experience(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    check_range(
        "experience",
        spec.experience_min,
        spec.experience_max,
        candidate.experience_years,
    )
}

fn check_salary(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    check_range(
        "salary",
        spec.salary_min,
        spec.salary_max,
        candidate.current_salary,
    )
}

fn check_text_equals(
    field: &str,
    wanted: Option<&str>,
    actual: Option<&str>,
) -> FilterDecision {
    let Some(wanted) = wanted else {
        return FilterDecision::Pass;
    };
    let Some(actual) = actual else {
        return FilterDecision::Unknown {
            reason: format!("{field}_missing: value not mentioned"),
        };
    };

    if wanted.trim().eq_ignore_ascii_case(actual.trim()) {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: format!("{field}_mismatch: wanted {wanted}, candidate has {actual}"),
        }
    }
}

/// Free-text fields filter by case-insensitive containment.
fn check_text_contains(
    field: &str,
    wanted: Option<&str>,
    actual: Option<&str>,
) -> FilterDecision {
    let Some(wanted) = wanted else {
        return FilterDecision::Pass;
    };
    let Some(actual) = actual else {
        return FilterDecision::Unknown {
            reason: format!("{field}_missing: value not mentioned"),
        };
    };

    if actual.to_lowercase().contains(&wanted.trim().to_lowercase()) {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: format!("{field}_mismatch: wanted {wanted}"),
        }
    }
}

fn check_designation(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    if spec.candidate_designations.is_empty() {
        return FilterDecision::Pass;
    }
    let Some(designation) = candidate.designation.as_deref() else {
        return FilterDecision::Unknown {
            reason: "designation_missing: value not mentioned".into(),
        };
    };

    if spec
        .candidate_designations
        .iter()
        .any(|d| d.eq_ignore_ascii_case(designation.trim()))
    {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: format!("designation_mismatch: {designation}"),
        }
    }
}

/// A candidate qualifies when they can start at least as soon as asked.
fn check_notice_period(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    let Some(wanted) = spec.notice_period else {
        return FilterDecision::Pass;
    };
    let Some(actual) = candidate.notice_period else {
        return FilterDecision::Unknown {
            reason: "notice_period_missing: value not mentioned".into(),
        };
    };

    if actual.days() <= wanted.days() {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: format!(
                "notice_period_too_long: {} exceeds {}",
                actual.label(),
                wanted.label()
            ),
        }
    }
}

fn check_remote_work(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    let Some(wanted) = spec.remote_work else {
        return FilterDecision::Pass;
    };
    let Some(actual) = candidate.remote_preference else {
        return FilterDecision::Unknown {
            reason: "remote_work_missing: preference not mentioned".into(),
        };
    };

    if wanted == actual {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: format!(
                "remote_work_mismatch: wanted {}, candidate prefers {}",
                wanted.label(),
                actual.label()
            ),
        }
    }
}

/// Only `travel_required = true` constrains; a no-travel posting accepts
/// everyone.
fn check_travel(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    if spec.travel_required != Some(true) {
        return FilterDecision::Pass;
    }

    match candidate.travel_ok {
        Some(true) => FilterDecision::Pass,
        Some(false) => FilterDecision::Reject {
            reason: "travel_declined: candidate will not travel".into(),
        },
        None => FilterDecision::Unknown {
            reason: "travel_missing: willingness not mentioned".into(),
        },
    }
}

fn check_resume_freshness(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    let Some(threshold) = spec.resume_freshness else {
        return FilterDecision::Pass;
    };
    let Some(updated_at) = candidate.resume_updated_at else {
        return FilterDecision::Unknown {
            reason: "resume_date_missing: no resume timestamp".into(),
        };
    };

    if updated_at >= threshold {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: format!("resume_stale: last updated {updated_at}"),
        }
    }
}

fn check_last_active(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    let Some(limit) = spec.last_active_days else {
        return FilterDecision::Pass;
    };
    let Some(days) = candidate.last_active_days else {
        return FilterDecision::Unknown {
            reason: "last_active_missing: no activity record".into(),
        };
    };

    if days <= limit {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: format!("inactive: last active {days} days ago, limit {limit}"),
        }
    }
}

fn check_diversity(spec: &RequirementSpec, candidate: &Candidate) -> FilterDecision {
    if spec.diversity_preference.is_empty()
        || spec.diversity_preference.contains(&DiversityTag::All)
    {
        return FilterDecision::Pass;
    }
    let Some(gender) = candidate.gender else {
        return FilterDecision::Unknown {
            reason: "gender_missing: value not mentioned".into(),
        };
    };

    if spec.diversity_preference.iter().any(|t| t.admits(gender)) {
        FilterDecision::Pass
    } else {
        FilterDecision::Reject {
            reason: "diversity_mismatch: outside the preferred set".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::RequirementBuilder;
    use crate::vocab::{Gender, Region};

    fn spec_with(mutator: impl FnOnce(&mut RequirementBuilder)) -> RequirementSpec {
        let mut builder = RequirementBuilder::new(Region::Default);
        builder.set_title("Backend Engineer");
        builder.set_description("Services team.");
        builder.set_job_location("Dubai");
        mutator(&mut builder);
        builder.finalize().unwrap()
    }

    fn base_candidate() -> Candidate {
        Candidate {
            id: 1,
            skills: vec!["Rust".into(), "Postgres".into()],
            location: Some("Dubai".into()),
            ..Candidate::default()
        }
    }

    #[test]
    fn empty_include_set_is_no_skill_filter() {
        let spec = spec_with(|_| {});
        let mut candidate = base_candidate();
        candidate.skills.clear();

        let report = run_all_filters(&spec, &candidate);
        assert!(!report.excluded);
    }

    #[test]
    fn zero_skill_overlap_rejects() {
        let spec = spec_with(|b| b.add_include_skill("go"));
        let report = run_all_filters(&spec, &base_candidate());

        assert!(report.excluded);
        assert!(report.reasons().iter().any(|r| r.contains("skill_mismatch")));
    }

    #[test]
    fn exclude_skill_wins_over_include_match() {
        let spec = spec_with(|b| {
            b.add_include_skill("rust");
            b.add_exclude_skill("postgres");
        });

        let report = run_all_filters(&spec, &base_candidate());
        assert!(report.excluded);
        assert!(report.reasons().iter().any(|r| r.contains("excluded_skill")));
    }

    #[test]
    fn relocation_flag_rescues_location_miss() {
        let spec = spec_with(|b| b.set_include_willing_to_relocate(true));
        let mut candidate = base_candidate();
        candidate.location = Some("Cairo".into());
        candidate.willing_to_relocate = true;

        let report = run_all_filters(&spec, &candidate);
        assert!(!report.excluded);
    }

    #[test]
    fn exclude_location_beats_relocation() {
        let spec = spec_with(|b| {
            b.set_include_willing_to_relocate(true);
            b.add_exclude_location("Cairo");
        });
        let mut candidate = base_candidate();
        candidate.location = Some("cairo".into());
        candidate.willing_to_relocate = true;

        let report = run_all_filters(&spec, &candidate);
        assert!(report.excluded);
        assert!(report
            .reasons()
            .iter()
            .any(|r| r.contains("excluded_location")));
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let spec = spec_with(|b| {
            b.set_numeric_range(crate::spec::RangeField::Experience, Some(3.0), Some(5.0))
        });

        for (years, expect_excluded) in [(3.0, false), (5.0, false), (2.9, true), (5.1, true)] {
            let mut candidate = base_candidate();
            candidate.experience_years = Some(years);
            let report = run_all_filters(&spec, &candidate);
            assert_eq!(report.excluded, expect_excluded, "years={years}");
        }
    }

    #[test]
    fn missing_bound_is_unbounded() {
        let spec = spec_with(|b| {
            b.set_numeric_range(crate::spec::RangeField::Experience, Some(3.0), None)
        });
        let mut candidate = base_candidate();
        candidate.experience_years = Some(25.0);

        assert!(!run_all_filters(&spec, &candidate).excluded);
    }

    #[test]
    fn include_not_mentioned_controls_missing_fields() {
        let mut candidate = base_candidate();
        candidate.experience_years = None;

        let strict = spec_with(|b| {
            b.set_numeric_range(crate::spec::RangeField::Experience, Some(3.0), Some(5.0))
        });
        assert!(run_all_filters(&strict, &candidate).excluded);

        let lenient = spec_with(|b| {
            b.set_numeric_range(crate::spec::RangeField::Experience, Some(3.0), Some(5.0));
            b.set_include_not_mentioned(true);
        });
        assert!(!run_all_filters(&lenient, &candidate).excluded);
    }

    #[test]
    fn notice_period_accepts_faster_joiners() {
        use crate::vocab::NoticePeriod;

        let spec = spec_with(|b| b.set_notice_period(Some(NoticePeriod::Days30)));

        let mut fast = base_candidate();
        fast.notice_period = Some(NoticePeriod::Days15);
        assert!(!run_all_filters(&spec, &fast).excluded);

        let mut slow = base_candidate();
        slow.notice_period = Some(NoticePeriod::Days90);
        assert!(run_all_filters(&spec, &slow).excluded);
    }

    #[test]
    fn diversity_specific_tags_filter_by_gender() {
        let spec = spec_with(|b| {
            b.set_diversity_preference(DiversityTag::Female, true);
        });

        let mut candidate = base_candidate();
        candidate.gender = Some(Gender::Female);
        assert!(!run_all_filters(&spec, &candidate).excluded);

        candidate.gender = Some(Gender::Male);
        assert!(run_all_filters(&spec, &candidate).excluded);
    }

    #[test]
    fn diversity_all_filters_nothing() {
        let spec = spec_with(|b| {
            b.set_diversity_preference(DiversityTag::All, true);
        });

        let mut candidate = base_candidate();
        candidate.gender = None;
        assert!(!run_all_filters(&spec, &candidate).excluded);
    }
}
