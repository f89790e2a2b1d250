use axum::Json;
use serde::{Deserialize, Serialize};

use rq_common::matching::{rank_candidates, MatchScore};
use rq_common::Candidate;

use crate::error::ApiError;
use crate::handlers::requirements::{build_spec, RequirementDraft};

const DEFAULT_PREVIEW_LIMIT: usize = 50;

/// Immediate-feedback matching: the dashboard sends the draft plus the
/// candidate page it is showing, and gets back the same verdicts the
/// search backend would produce.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreviewRequest {
    pub requirement: RequirementDraft,
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreviewItem {
    pub candidate: Candidate,
    pub score: MatchScore,
    pub reasons: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchPreviewResponse {
    pub total_considered: usize,
    pub matches: Vec<MatchPreviewItem>,
}

pub async fn preview(
    Json(request): Json<MatchPreviewRequest>,
) -> Result<Json<MatchPreviewResponse>, ApiError> {
    let spec = build_spec(request.requirement)?;
    let limit = request.limit.unwrap_or(DEFAULT_PREVIEW_LIMIT).clamp(1, 200);
    let total_considered = request.candidates.len();

    let matches = rank_candidates(&spec, &request.candidates)
        .into_iter()
        .take(limit)
        .map(|m| MatchPreviewItem {
            reasons: m.report.reasons(),
            score: m.score,
            candidate: m.candidate,
        })
        .collect();

    Ok(Json(MatchPreviewResponse {
        total_considered,
        matches,
    }))
}
