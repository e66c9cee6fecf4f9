use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
};
use tracing::info;

use labsched_core::{
    models::{
        LoginRequest, LoginResponse, RegisterRequest, UpdatePasswordRequest,
        UpdateProfileRequest, UserResponse,
    },
    pagination::ListQuery,
};

use crate::{
    ApiState,
    extract::{Json, Path},
    middleware::{auth::AuthUser, error_handling::AppError},
    response::{ApiResponse, PaginatedResponse},
};

pub async fn login(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    let user = state.users.login(payload).await?;
    let token = state.jwt.issue(user.id, user.role)?;
    info!("User {} logged in", user.id);

    Ok(ApiResponse::ok(
        "Successfully logged in",
        LoginResponse {
            user: user.into(),
            token,
        },
    ))
}

pub async fn register(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let user = state.users.register(payload).await?;
    Ok(ApiResponse::created("Successfully registered", user))
}

pub async fn get_user_credential(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let user = state.users.get_user(auth.user_id).await?;
    Ok(ApiResponse::ok("Successfully get user credentials", user))
}

pub async fn update_profile(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let user = state.users.update_profile(auth.user_id, payload).await?;
    Ok(ApiResponse::ok("Successfully updated profile", user))
}

pub async fn update_password(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<UpdatePasswordRequest>,
) -> Result<ApiResponse<UserResponse>, AppError> {
    let user = state.users.update_password(auth.user_id, payload).await?;
    Ok(ApiResponse::ok("Successfully updated password", user))
}

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UserListQuery {
    #[serde(flatten)]
    pub list: ListQuery,
    pub include_deleted: Option<String>,
}

pub async fn list_users(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<UserListQuery>,
) -> Result<PaginatedResponse<UserResponse>, AppError> {
    let include_deleted = matches!(query.include_deleted.as_deref(), Some("true" | "1"));
    let users = state.users.list_users(&query.list, include_deleted).await?;
    Ok(PaginatedResponse::ok("Successfully get all users", users))
}

pub async fn delete_user(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    state.users.delete_user(id).await?;
    Ok(ApiResponse::ok("Successfully deleted user", ()))
}
