use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::vocab::{Currency, DiversityTag, NoticePeriod, Region, RemoteWork};

use super::payload::SubmissionPayload;

/// A finalized requirement: the normalized, conflict-free filter criteria
/// for one candidate search.
///
/// Instances are produced only by `RequirementBuilder::finalize` and are
/// not mutated afterwards. Guarantees at that point:
/// - title/description/job_location are trimmed and non-empty
/// - skill and designation entries are title-cased and deduplicated
/// - include/exclude location sets are disjoint by case-insensitive key,
///   and include_locations contains the job location unless it was
///   explicitly excluded
/// - include/exclude skill sets are disjoint (exclude wins)
/// - numeric ranges are non-negative and ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequirementSpec {
    pub title: String,
    pub description: String,
    pub job_location: String,
    pub include_skills: Vec<String>,
    pub exclude_skills: Vec<String>,
    pub key_skills: Vec<String>,
    pub include_locations: Vec<String>,
    pub exclude_locations: Vec<String>,
    pub candidate_designations: Vec<String>,
    pub experience_min: Option<f64>,
    pub experience_max: Option<f64>,
    pub salary_min: Option<f64>,
    pub salary_max: Option<f64>,
    pub currency: Currency,
    pub education: Option<String>,
    pub industry: Option<String>,
    pub department: Option<String>,
    pub notice_period: Option<NoticePeriod>,
    pub remote_work: Option<RemoteWork>,
    pub travel_required: Option<bool>,
    pub include_willing_to_relocate: bool,
    pub include_not_mentioned: bool,
    pub benefits: Vec<String>,
    pub institute: Option<String>,
    pub current_company: Option<String>,
    pub resume_freshness: Option<NaiveDate>,
    pub last_active_days: Option<u32>,
    pub diversity_preference: Vec<DiversityTag>,
    pub valid_till: Option<NaiveDate>,
    pub region: Region,
}

impl RequirementSpec {
    /// Serialize into the wire shape the submission backend accepts.
    pub fn to_payload(&self) -> SubmissionPayload {
        SubmissionPayload::from_spec(self)
    }

    /// True when no skill filter applies (empty include set).
    pub fn has_skill_filter(&self) -> bool {
        !self.include_skills.is_empty()
    }

    /// True when no include-location filter applies.
    pub fn has_location_filter(&self) -> bool {
        !self.include_locations.is_empty()
    }
}
