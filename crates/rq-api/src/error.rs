use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::{borrow::Cow, future::Future};
use thiserror::Error;
use tracing::error;

use rq_common::spec::ValidationFailure;

use crate::submit::SubmitError;

tokio::task_local! {
    static REQUEST_ID: String;
}

fn sanitize_message(message: &str) -> String {
    const MAX_LEN: usize = 240;

    let mut cleaned = message
        .chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .replace(['\n', '\r'], " ");

    cleaned = cleaned
        .split_whitespace()
        .map(|token| {
            if token.contains("://") {
                "[redacted-url]".to_string()
            } else if let Some((base, _)) = token.split_once('?') {
                if base.is_empty() {
                    "[redacted-query]".to_string()
                } else {
                    format!("{base}?[redacted]")
                }
            } else {
                token.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    if cleaned.len() > MAX_LEN {
        cleaned.truncate(MAX_LEN);
        cleaned.push('…');
    }

    if cleaned.trim().is_empty() {
        "unexpected error".to_string()
    } else {
        cleaned
    }
}

pub async fn with_request_id<Fut, T>(request_id: Option<String>, fut: Fut) -> T
where
    Fut: Future<Output = T>,
{
    if let Some(request_id) = request_id {
        REQUEST_ID.scope(request_id, fut).await
    } else {
        fut.await
    }
}

pub fn current_request_id() -> Option<String> {
    REQUEST_ID.try_with(|value| value.clone()).ok()
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Recoverable user-input problems from finalize; carries every
    /// violated rule so the form can show them all at once.
    #[error("validation failed: {0}")]
    Validation(ValidationFailure),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("duplicate requirement: {0}")]
    Duplicate(String),
    #[error("submission rejected: {0}")]
    SubmissionRejected(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal server error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    code: &'static str,
    message: String,
    request_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<String>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let code = self.code();
        let request_id = current_request_id();

        error!(
            code,
            status = %status,
            request_id = request_id.as_deref().unwrap_or(""),
            error = %self,
            "api_error"
        );

        let errors = match &self {
            ApiError::Validation(failure) => Some(failure.messages()),
            _ => None,
        };

        let body = Json(ErrorResponse {
            code,
            message: self.public_message().into_owned(),
            request_id,
            errors,
        });

        (status, body).into_response()
    }
}

impl ApiError {
    fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_failed",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::NotFound(_) => "not_found",
            ApiError::QuotaExceeded(_) => "quota_exceeded",
            ApiError::PermissionDenied(_) => "permission_denied",
            ApiError::Duplicate(_) => "duplicate",
            ApiError::SubmissionRejected(_) => "submission_rejected",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
        }
    }

    fn public_message(&self) -> Cow<'static, str> {
        match self {
            ApiError::Validation(_) => Cow::Borrowed("requirement validation failed"),
            ApiError::BadRequest(msg) => Cow::Owned(sanitize_message(msg)),
            ApiError::NotFound(msg) => Cow::Owned(sanitize_message(msg)),
            // Submission failures surface the upstream text (sanitized),
            // never a bare category.
            ApiError::QuotaExceeded(msg)
            | ApiError::PermissionDenied(msg)
            | ApiError::Duplicate(msg)
            | ApiError::SubmissionRejected(msg) => Cow::Owned(sanitize_message(msg)),
            ApiError::ServiceUnavailable(_) => Cow::Borrowed("service unavailable"),
            ApiError::Internal(_) => Cow::Borrowed("internal server error"),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::QuotaExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            ApiError::Duplicate(_) => StatusCode::CONFLICT,
            ApiError::SubmissionRejected(_) => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationFailure> for ApiError {
    fn from(value: ValidationFailure) -> Self {
        ApiError::Validation(value)
    }
}

impl From<SubmitError> for ApiError {
    fn from(value: SubmitError) -> Self {
        match value {
            SubmitError::QuotaExceeded(msg) => ApiError::QuotaExceeded(msg),
            SubmitError::PermissionDenied(msg) => ApiError::PermissionDenied(msg),
            SubmitError::Duplicate(msg) => ApiError::Duplicate(msg),
            SubmitError::Rejected(msg) => ApiError::SubmissionRejected(msg),
            SubmitError::Transport(msg) => ApiError::ServiceUnavailable(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use http_body_util::BodyExt;
    use serde_json::Value;

    use rq_common::spec::{ValidationError, ValidationFailure};

    use super::*;

    #[tokio::test]
    async fn includes_request_id_in_response_body_when_present() {
        let err = ApiError::Internal("boom".into());
        let response = with_request_id(Some("req-123".into()), async { err.into_response() }).await;

        let (parts, body) = response.into_parts();
        assert_eq!(parts.status, StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = body.collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["request_id"], "req-123");
    }

    #[tokio::test]
    async fn validation_errors_list_every_message() {
        let failure = ValidationFailure::new(vec![
            ValidationError::MissingRequiredField { field: "title" },
            ValidationError::MissingRequiredField { field: "description" },
        ]);

        let response = ApiError::from(failure).into_response();
        let (parts, body) = response.into_parts();
        assert_eq!(parts.status, StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = body.collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        let errors = json["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0], "title is required");
    }

    #[test]
    fn sanitize_redacts_urls_and_truncates() {
        let sanitized = sanitize_message("failed https://internal.host/path token");
        assert!(sanitized.contains("[redacted-url]"));

        let long = "x".repeat(500);
        assert!(sanitize_message(&long).chars().count() <= 241);
    }
}
