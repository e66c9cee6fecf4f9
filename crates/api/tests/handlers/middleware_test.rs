use axum::{
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use rstest::rstest;
use serde_json::Value;

use labsched_api::middleware::error_handling::AppError;
use labsched_core::{errors::LabError, models::Role};

use crate::test_utils::{TestContext, bearer, user};

#[rstest]
#[case::not_found(LabError::NotFound("lab 9 not found".into()), StatusCode::BAD_REQUEST)]
#[case::validation(LabError::Validation("month".into()), StatusCode::BAD_REQUEST)]
#[case::authentication(LabError::Authentication("no token".into()), StatusCode::UNAUTHORIZED)]
#[case::authorization(LabError::Authorization("admin".into()), StatusCode::UNAUTHORIZED)]
#[case::database(LabError::Database(eyre::eyre!("gone")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: LabError, #[case] expected: StatusCode) {
    let response = AppError(error).into_response();
    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_missing_token_is_rejected() {
    let server = TestContext::new().server();

    let response = server.get("/api/v1/user").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert_eq!(body["status_code"], 401);
    assert_eq!(body["message"], "Unauthorized");
    assert!(body["errors"].as_str().unwrap().contains("no token provided"));
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/v1/user")
        .add_header(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_token_cannot_reach_admin_routes() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/v1/admin/dashboard")
        .add_header(header::AUTHORIZATION, bearer(7, Role::User))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    let body = response.json::<Value>();
    assert!(body["errors"].as_str().unwrap().contains("admin role required"));
}

#[tokio::test]
async fn test_admin_token_cannot_reach_user_routes() {
    let server = TestContext::new().server();

    let response = server
        .get("/api/v1/user/notification")
        .add_header(header::AUTHORIZATION, bearer(1, Role::Admin))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_user_token_reaches_handler() {
    let mut ctx = TestContext::new();
    ctx.users
        .expect_get_user_by_id()
        .withf(|id| *id == 7)
        .times(1)
        .returning(|id| Ok(Some(user(id, Role::User))));
    let server = ctx.server();

    let response = server
        .get("/api/v1/user")
        .add_header(header::AUTHORIZATION, bearer(7, Role::User))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["data"]["email"], "user7@kampus.ac.id");
    assert!(body["data"].get("password_hash").is_none());
}
