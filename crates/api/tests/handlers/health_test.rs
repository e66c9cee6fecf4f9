use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn test_health_check() {
    let server = TestContext::new().server();

    let response = server.get("/api/v1/health").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>(), json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_version_reports_crate_version() {
    let server = TestContext::new().server();

    let body = server.get("/api/v1/version").await.json::<Value>();

    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}
