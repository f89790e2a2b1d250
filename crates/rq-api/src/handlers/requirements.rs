use axum::{extract::State, Json};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use rq_common::spec::{RangeField, RequirementBuilder, RequirementSpec, SubmissionPayload};
use rq_common::vocab::{Currency, DiversityTag, NoticePeriod, Region, RemoteWork};

use crate::error::ApiError;
use crate::submit::SubmitReceipt;
use crate::SharedState;

/// Field-level requirement input as the dashboard pages send it. Dropdown
/// values arrive as display strings; unknown ones are caller faults
/// (400), not validation results.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequirementDraft {
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
    pub currency: Option<String>,
    pub education: Option<String>,
    pub industry: Option<String>,
    pub department: Option<String>,
    pub notice_period: Option<String>,
    pub remote_work: Option<String>,
    pub travel_required: Option<bool>,
    pub include_willing_to_relocate: bool,
    pub include_not_mentioned: bool,
    pub benefits: Vec<String>,
    pub institute: Option<String>,
    pub current_company: Option<String>,
    pub resume_freshness: Option<NaiveDate>,
    pub last_active_days: Option<u32>,
    pub diversity_preference: Vec<String>,
    pub valid_till: Option<NaiveDate>,
    pub region: Option<String>,
}

/// Replays a draft through the builder ops and finalizes it. Validation
/// failures come back as one aggregated 422; enum faults as 400.
pub fn build_spec(draft: RequirementDraft) -> Result<RequirementSpec, ApiError> {
    let region = match draft.region.as_deref() {
        None => Region::Default,
        Some(raw) => Region::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown region: {raw}")))?,
    };

    let mut builder = RequirementBuilder::new(region);
    builder.set_title(draft.title);
    builder.set_description(draft.description);
    builder.set_job_location(draft.job_location);

    for skill in &draft.include_skills {
        builder.add_include_skill(skill);
    }
    for skill in &draft.exclude_skills {
        builder.add_exclude_skill(skill);
    }
    for skill in &draft.key_skills {
        builder.add_key_skill(skill);
    }

    // Includes first, then excludes: the exclude list is the later write
    // and takes the contested keys, matching the form's behavior.
    for location in &draft.include_locations {
        builder.add_include_location(location);
    }
    for location in &draft.exclude_locations {
        builder.add_exclude_location(location);
    }

    for designation in &draft.candidate_designations {
        builder.add_designation(designation);
    }
    for benefit in &draft.benefits {
        builder.add_benefit(benefit);
    }

    builder.set_numeric_range(RangeField::Experience, draft.experience_min, draft.experience_max);
    builder.set_numeric_range(RangeField::Salary, draft.salary_min, draft.salary_max);

    if let Some(raw) = draft.currency.as_deref() {
        let currency = Currency::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown currency: {raw}")))?;
        builder.set_currency(currency);
    }
    if let Some(raw) = draft.notice_period.as_deref() {
        let notice = NoticePeriod::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown notice period: {raw}")))?;
        builder.set_notice_period(Some(notice));
    }
    if let Some(raw) = draft.remote_work.as_deref() {
        let mode = RemoteWork::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown work mode: {raw}")))?;
        builder.set_remote_work(Some(mode));
    }
    for raw in &draft.diversity_preference {
        let tag = DiversityTag::parse(raw)
            .ok_or_else(|| ApiError::BadRequest(format!("unknown diversity value: {raw}")))?;
        builder.set_diversity_preference(tag, true);
    }

    builder.set_education(draft.education);
    builder.set_industry(draft.industry);
    builder.set_department(draft.department);
    builder.set_travel_required(draft.travel_required);
    builder.set_include_willing_to_relocate(draft.include_willing_to_relocate);
    builder.set_include_not_mentioned(draft.include_not_mentioned);
    builder.set_institute(draft.institute);
    builder.set_current_company(draft.current_company);
    builder.set_resume_freshness(draft.resume_freshness);
    builder.set_last_active_days(draft.last_active_days);
    builder.set_valid_till(draft.valid_till);

    Ok(builder.finalize()?)
}

/// Normalizes a draft and returns the wire payload without submitting it
/// anywhere; the dashboards use this for the review step.
pub async fn preview(
    Json(draft): Json<RequirementDraft>,
) -> Result<Json<SubmissionPayload>, ApiError> {
    let spec = build_spec(draft)?;
    Ok(Json(spec.to_payload()))
}

#[derive(Debug, Serialize)]
pub struct CreateResponse {
    pub requirement_id: Option<String>,
    pub status: String,
}

impl From<SubmitReceipt> for CreateResponse {
    fn from(receipt: SubmitReceipt) -> Self {
        Self {
            requirement_id: receipt.id,
            status: receipt.status,
        }
    }
}

/// Finalize and hand off to the evaluator service in one step. The
/// builder state is gone after this; retries re-send the same payload.
pub async fn create(
    State(state): State<SharedState>,
    Json(draft): Json<RequirementDraft>,
) -> Result<Json<CreateResponse>, ApiError> {
    let spec = build_spec(draft)?;
    let payload = spec.to_payload();

    info!(
        title = %spec.title,
        region = ?spec.region,
        include_skills = spec.include_skills.len(),
        include_locations = spec.include_locations.len(),
        "submitting requirement"
    );

    let receipt = state.submitter.submit(&payload).await?;
    Ok(Json(receipt.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_draft() -> RequirementDraft {
        RequirementDraft {
            title: "Store Manager".into(),
            description: "Runs the flagship store.".into(),
            job_location: "Dubai".into(),
            ..RequirementDraft::default()
        }
    }

    #[test]
    fn draft_replays_location_conflicts_in_order() {
        let mut draft = minimal_draft();
        draft.include_locations = vec!["Sharjah".into()];
        draft.exclude_locations = vec!["sharjah".into()];

        let spec = build_spec(draft).unwrap();
        assert_eq!(spec.include_locations, vec!["Dubai".to_string()]);
        assert_eq!(spec.exclude_locations, vec!["sharjah".to_string()]);
    }

    #[test]
    fn unknown_currency_is_a_caller_fault() {
        let mut draft = minimal_draft();
        draft.currency = Some("USD".into());

        match build_spec(draft) {
            Err(ApiError::BadRequest(msg)) => assert!(msg.contains("USD")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn missing_required_fields_become_validation_errors() {
        let draft = RequirementDraft::default();

        match build_spec(draft) {
            Err(ApiError::Validation(failure)) => {
                assert_eq!(failure.errors.len(), 3);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn dropdown_strings_parse_tolerantly() {
        let mut draft = minimal_draft();
        draft.notice_period = Some("15 Days".into());
        draft.remote_work = Some("onsite".into());
        draft.diversity_preference = vec!["all".into(), "female".into()];

        let spec = build_spec(draft).unwrap();
        assert_eq!(spec.notice_period, Some(NoticePeriod::Days15));
        assert_eq!(spec.remote_work, Some(RemoteWork::OnSite));
        // "female" checked after "all" evicts it
        assert_eq!(spec.diversity_preference, vec![DiversityTag::Female]);
    }
}
