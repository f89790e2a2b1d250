use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use rq_common::spec::SubmissionPayload;

const SUBMIT_ENDPOINT: &str = "/requirements";
const HEALTH_ENDPOINT: &str = "/health";

/// Submission failure, classified into the categories the UI knows how to
/// present. The upstream message rides along verbatim.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("requirement quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("duplicate requirement: {0}")]
    Duplicate(String),
    #[error("submission rejected: {0}")]
    Rejected(String),
    #[error("evaluator unreachable: {0}")]
    Transport(String),
}

/// What the evaluator backend acknowledges a stored requirement with.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitReceipt {
    #[serde(default)]
    pub id: Option<String>,
    pub status: String,
}

/// HTTP client for the external evaluator/submission service.
#[derive(Debug, Clone)]
pub struct EvaluatorClient {
    client: reqwest::Client,
    base_url: String,
}

impl EvaluatorClient {
    pub fn new(base_url: String, timeout_secs: u64) -> Result<Self, SubmitError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fire the single finalize-and-submit request. Safe to retry: the
    /// payload is a pure function of the finalized spec.
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmitReceipt, SubmitError> {
        let url = format!("{}{}", self.base_url, SUBMIT_ENDPOINT);

        let response = self
            .client
            .post(&url)
            .json(payload)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            let receipt: SubmitReceipt = response
                .json()
                .await
                .map_err(|err| SubmitError::Rejected(format!("unreadable receipt: {err}")))?;

            info!(
                status = %receipt.status,
                requirement_id = receipt.id.as_deref().unwrap_or(""),
                "requirement submitted"
            );
            return Ok(receipt);
        }

        let body = response.text().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }

    pub async fn ping(&self) -> Result<(), SubmitError> {
        let url = format!("{}{}", self.base_url, HEALTH_ENDPOINT);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| SubmitError::Transport(err.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(SubmitError::Transport(format!(
                "evaluator health returned {}",
                response.status()
            )))
        }
    }
}

/// Map an upstream rejection onto the user-facing categories. Status codes
/// decide first; message keywords catch backends that flatten everything
/// into 400s.
pub fn classify_failure(status: StatusCode, body: &str) -> SubmitError {
    let message = if body.trim().is_empty() {
        format!("evaluator returned {status}")
    } else {
        body.trim().to_string()
    };

    match status {
        StatusCode::TOO_MANY_REQUESTS => return SubmitError::QuotaExceeded(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            return SubmitError::PermissionDenied(message)
        }
        StatusCode::CONFLICT => return SubmitError::Duplicate(message),
        _ => {}
    }

    let lower = message.to_lowercase();
    if lower.contains("quota") || lower.contains("limit reached") {
        SubmitError::QuotaExceeded(message)
    } else if lower.contains("duplicate") || lower.contains("already exists") {
        SubmitError::Duplicate(message)
    } else if lower.contains("permission") || lower.contains("not allowed") {
        SubmitError::PermissionDenied(message)
    } else {
        SubmitError::Rejected(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_classify_first() {
        assert!(matches!(
            classify_failure(StatusCode::TOO_MANY_REQUESTS, "slow down"),
            SubmitError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::FORBIDDEN, "nope"),
            SubmitError::PermissionDenied(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::CONFLICT, ""),
            SubmitError::Duplicate(_)
        ));
    }

    #[test]
    fn keywords_classify_flattened_errors() {
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, "monthly quota reached for employer"),
            SubmitError::QuotaExceeded(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, "requirement already exists"),
            SubmitError::Duplicate(_)
        ));
        assert!(matches!(
            classify_failure(StatusCode::BAD_REQUEST, "posting not allowed for this plan"),
            SubmitError::PermissionDenied(_)
        ));
    }

    #[test]
    fn unclassified_failures_keep_the_upstream_message() {
        let err = classify_failure(StatusCode::BAD_REQUEST, "schema mismatch on validTill");
        match err {
            SubmitError::Rejected(msg) => assert!(msg.contains("validTill")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn empty_bodies_fall_back_to_the_status_line() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "  ");
        match err {
            SubmitError::Rejected(msg) => assert!(msg.contains("500")),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
