use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use labsched_core::models::{NewUser, Role, User};

use crate::test_utils::{TestContext, at, jwt, user};

#[tokio::test]
async fn test_login_issues_token_for_role() {
    let mut ctx = TestContext::new();
    ctx.users
        .expect_get_user_by_email()
        .withf(|email| email == "user3@kampus.ac.id")
        .times(1)
        .returning(|_| Ok(Some(user(3, Role::Admin))));
    let server = ctx.server();

    let response = server
        .post("/api/v1/login")
        .json(&json!({ "email": "USER3@kampus.ac.id", "password": "rahasia123" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Successfully logged in");
    assert_eq!(body["data"]["user"]["user_id"], 3);

    let claims = jwt().verify(body["data"]["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.user_id, 3);
    assert_eq!(claims.role, Role::Admin);
}

#[tokio::test]
async fn test_login_with_wrong_password_is_unauthorized() {
    let mut ctx = TestContext::new();
    ctx.users
        .expect_get_user_by_email()
        .returning(|_| Ok(Some(user(3, Role::User))));
    let server = ctx.server();

    let response = server
        .post("/api/v1/login")
        .json(&json!({ "email": "user3@kampus.ac.id", "password": "salah" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.json::<Value>()["errors"],
        "Authentication error: invalid email or password"
    );
}

#[tokio::test]
async fn test_register_returns_created() {
    let mut ctx = TestContext::new();
    ctx.users.expect_get_user_by_email().returning(|_| Ok(None));
    ctx.users
        .expect_create_user()
        .withf(|new: &NewUser| new.role == Role::User && new.email == "budi@kampus.ac.id")
        .times(1)
        .returning(|new| {
            Ok(User {
                id: 11,
                full_name: new.full_name,
                email: new.email,
                password_hash: new.password_hash,
                nim_nip: new.nim_nip,
                profile_picture: new.profile_picture,
                role: new.role,
                created_at: at(4),
                updated_at: at(4),
                deleted_at: None,
            })
        });
    let server = ctx.server();

    let response = server
        .post("/api/v1/register")
        .json(&json!({
            "full_name": "Budi Santoso",
            "email": "Budi@kampus.ac.id",
            "password": "rahasia123",
            "confirm_password": "rahasia123",
            "nim_nip": "130120011",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["user_id"], 11);
    assert_eq!(body["data"]["role"], "user");
}

#[tokio::test]
async fn test_register_rejects_mismatched_passwords() {
    let mut ctx = TestContext::new();
    ctx.users.expect_create_user().never();
    let server = ctx.server();

    let response = server
        .post("/api/v1/register")
        .json(&json!({
            "full_name": "Budi Santoso",
            "email": "budi@kampus.ac.id",
            "password": "rahasia123",
            "confirm_password": "rahasia321",
            "nim_nip": "130120011",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_body_uses_error_envelope() {
    let mut ctx = TestContext::new();
    ctx.users.expect_get_user_by_email().never();
    let server = ctx.server();

    let response = server
        .post("/api/v1/login")
        .text("{\"email\": ")
        .content_type("application/json")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body = response.json::<Value>();
    assert_eq!(body["status_code"], 400);
    assert!(body["errors"].as_str().unwrap().starts_with("Validation error:"));
}
