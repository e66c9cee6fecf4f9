use std::sync::Arc;

use axum::{Extension, extract::State};

use labsched_core::models::{NotificationResponse, TemplateMessageInput, TemplateMessageResponse};

use crate::{
    ApiState,
    extract::{Json, Path},
    middleware::{auth::AuthUser, error_handling::AppError},
    response::ApiResponse,
};

pub async fn get_notifications(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
) -> Result<ApiResponse<NotificationResponse>, AppError> {
    let notifications = state
        .notifications
        .get_notifications_by_user_id(auth.user_id)
        .await?;
    Ok(ApiResponse::ok(
        "Successfully to get notification by user id",
        notifications,
    ))
}

pub async fn list_template_messages(
    State(state): State<Arc<ApiState>>,
) -> Result<ApiResponse<Vec<TemplateMessageResponse>>, AppError> {
    let templates = state.templates.list_template_messages().await?;
    Ok(ApiResponse::ok(
        "Successfully get all template messages",
        templates,
    ))
}

pub async fn get_template_message(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<TemplateMessageResponse>, AppError> {
    let template = state.templates.get_template_message_by_id(id).await?;
    Ok(ApiResponse::ok(
        "Successfully to get template message by id",
        template,
    ))
}

pub async fn create_template_message(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<TemplateMessageInput>,
) -> Result<ApiResponse<TemplateMessageResponse>, AppError> {
    let template = state.templates.create_template_message(payload).await?;
    Ok(ApiResponse::created(
        "Successfully to created a template message",
        template,
    ))
}

pub async fn update_template_message(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<TemplateMessageInput>,
) -> Result<ApiResponse<TemplateMessageResponse>, AppError> {
    let template = state.templates.update_template_message(id, payload).await?;
    Ok(ApiResponse::ok(
        "Successfully updated template message",
        template,
    ))
}
