//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint, including the lazy
//! expiry behavior under a manually controlled clock.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use pastekv::{api::create_router, AppState, Config, ManualClock, MemoryKv};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::from_config(&Config::default()))
}

fn create_clocked_app() -> (Router, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(1_000_000));
    let state = AppState::new(
        Arc::new(MemoryKv::new()),
        clock.clone(),
        &Config::default(),
    );
    (create_router(state), clock)
}

fn update_request(name: &str, content: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/update")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({
                "name": name,
                "content": content,
                "password": password,
            })
            .to_string(),
        ))
        .unwrap()
}

fn query_request(name: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/query")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "name": name }).to_string()))
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == UPDATE Endpoint Tests ==

#[tokio::test]
async fn test_update_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(update_request("test_note", "some content", "pw"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json.get("message").is_some());
    assert!(json["message"].as_str().unwrap().contains("test_note"));
}

#[tokio::test]
async fn test_update_then_query() {
    let app = create_test_app();

    let update_response = app
        .clone()
        .oneshot(update_request("note", "hello world", "pw"))
        .await
        .unwrap();
    assert_eq!(update_response.status(), StatusCode::OK);

    let query_response = app.oneshot(query_request("note")).await.unwrap();
    assert_eq!(query_response.status(), StatusCode::OK);

    let json = body_to_json(query_response.into_body()).await;
    assert_eq!(json["name"].as_str().unwrap(), "note");
    assert_eq!(json["content"].as_str().unwrap(), "hello world");
}

#[tokio::test]
async fn test_update_overwrite_requires_matching_password() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(update_request("guarded", "v1", "secret"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Wrong password is rejected.
    let response = app
        .clone()
        .oneshot(update_request("guarded", "v2", "wrong"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Matching password overwrites.
    let response = app
        .clone()
        .oneshot(update_request("guarded", "v2", "secret"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let query_response = app.oneshot(query_request("guarded")).await.unwrap();
    let json = body_to_json(query_response.into_body()).await;
    assert_eq!(json["content"].as_str().unwrap(), "v2");
}

// == QUERY Endpoint Tests ==

#[tokio::test]
async fn test_query_endpoint_not_found() {
    let app = create_test_app();

    let response = app.oneshot(query_request("nonexistent")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == HEALTH Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"].as_str().unwrap(), "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Error Response Tests ==

#[tokio::test]
async fn test_invalid_json_request() {
    let app = create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/update")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"invalid json"#))
                .unwrap(),
        )
        .await
        .unwrap();

    // Axum returns 422 for JSON parsing errors by default
    assert!(
        response.status() == StatusCode::BAD_REQUEST
            || response.status() == StatusCode::UNPROCESSABLE_ENTITY
    );
}

#[tokio::test]
async fn test_missing_fields_request() {
    let app = create_test_app();

    let response = app
        .oneshot(update_request("", "content", "pw"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == TTL Expiration via API Tests ==

#[tokio::test]
async fn test_ttl_expiration_via_api() {
    let (app, clock) = create_clocked_app();

    let response = app
        .clone()
        .oneshot(update_request("ephemeral", "fades away", "pw"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Visible immediately
    let response = app.clone().oneshot(query_request("ephemeral")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Past the default TTL the record reads as absent, even though no
    // sweep has physically removed it yet.
    clock.advance(Config::default().default_ttl);

    let response = app.oneshot(query_request("ephemeral")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
