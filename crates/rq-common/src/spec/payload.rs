use chrono::NaiveDate;
use serde::Serialize;

use crate::vocab::{Currency, DiversityTag, NoticePeriod, Region, RemoteWork};

use super::requirement::RequirementSpec;

/// Wire shape handed to the submission backend. Key names are part of the
/// protocol and must not drift; optional scalars are omitted, not null.
///
/// `skills` mirrors `keySkills` — the backend schema still reads both.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionPayload {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_salary_max: Option<f64>,
    pub currency: Currency,
    pub skills: Vec<String>,
    pub key_skills: Vec<String>,
    pub include_skills: Vec<String>,
    pub exclude_skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub education: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_till: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice_period: Option<NoticePeriod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_work: Option<RemoteWork>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub travel_required: Option<bool>,
    pub candidate_locations: Vec<String>,
    pub exclude_locations: Vec<String>,
    pub candidate_designations: Vec<String>,
    pub include_willing_to_relocate: bool,
    pub include_not_mentioned: bool,
    pub benefits: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_freshness: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diversity_preference: Vec<DiversityTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
}

impl SubmissionPayload {
    pub fn from_spec(spec: &RequirementSpec) -> Self {
        Self {
            title: spec.title.clone(),
            description: spec.description.clone(),
            location: spec.job_location.clone(),
            work_experience_min: spec.experience_min,
            work_experience_max: spec.experience_max,
            current_salary_min: spec.salary_min,
            current_salary_max: spec.salary_max,
            currency: spec.currency,
            skills: spec.key_skills.clone(),
            key_skills: spec.key_skills.clone(),
            include_skills: spec.include_skills.clone(),
            exclude_skills: spec.exclude_skills.clone(),
            education: spec.education.clone(),
            industry: spec.industry.clone(),
            department: spec.department.clone(),
            valid_till: spec.valid_till,
            notice_period: spec.notice_period,
            remote_work: spec.remote_work,
            travel_required: spec.travel_required,
            candidate_locations: spec.include_locations.clone(),
            exclude_locations: spec.exclude_locations.clone(),
            candidate_designations: spec.candidate_designations.clone(),
            include_willing_to_relocate: spec.include_willing_to_relocate,
            include_not_mentioned: spec.include_not_mentioned,
            benefits: spec.benefits.clone(),
            institute: spec.institute.clone(),
            resume_freshness: spec.resume_freshness,
            current_company: spec.current_company.clone(),
            last_active: spec.last_active_days,
            diversity_preference: spec.diversity_preference.clone(),
            region: match spec.region {
                Region::Default => None,
                Region::Gulf => Some(Region::Gulf),
            },
        }
    }
}
