use axum::{body::Body, http::Request, http::StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn livez_is_healthy() {
    let state = rq_api::test_state("http://127.0.0.1:9");
    let app = rq_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/livez")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn empty_draft_returns_every_validation_message() {
    let state = rq_api::test_state("http://127.0.0.1:9");
    let app = rq_api::create_router(state);

    let response = app
        .oneshot(post_json("/api/requirements/preview", &serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(json["code"], "validation_failed");
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3);
    let joined = errors
        .iter()
        .map(|e| e.as_str().unwrap())
        .collect::<Vec<_>>()
        .join("; ");
    assert!(joined.contains("title"));
    assert!(joined.contains("description"));
    assert!(joined.contains("jobLocation"));
}

#[tokio::test]
async fn unknown_currency_is_a_bad_request() {
    let state = rq_api::test_state("http://127.0.0.1:9");
    let app = rq_api::create_router(state);

    let draft = serde_json::json!({
        "title": "Accountant",
        "description": "Monthly close.",
        "jobLocation": "Manama",
        "currency": "USD",
    });

    let response = app
        .oneshot(post_json("/api/requirements/preview", &draft))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let state = rq_api::test_state("http://127.0.0.1:9");
    let app = rq_api::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/livez")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}
