//! Integration tests for the health endpoint.

mod common;

use axum::http::StatusCode;

#[tokio::test]
async fn test_health_returns_200_with_status_ok() {
    let app = common::TestApp::new();

    let (status, json) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_unknown_route_returns_404() {
    let app = common::TestApp::new();

    let (status, _) = app.get("/api/v1/nonexistent", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
