use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
};

use labsched_core::{
    models::{HistorySearchInput, HistorySearchResponse, HistorySeenLabResponse},
    pagination::ListQuery,
};

use crate::{
    ApiState,
    extract::{Json, Path},
    middleware::{auth::AuthUser, error_handling::AppError},
    response::{ApiResponse, PaginatedResponse},
};

pub async fn list_history_searches(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<PaginatedResponse<HistorySearchResponse>, AppError> {
    let history = state
        .history
        .list_history_searches(auth.user_id, &query)
        .await?;
    Ok(PaginatedResponse::ok(
        "Successfully get all historySearch",
        history,
    ))
}

pub async fn create_history_search(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<HistorySearchInput>,
) -> Result<ApiResponse<HistorySearchResponse>, AppError> {
    let history = state
        .history
        .create_history_search(auth.user_id, payload)
        .await?;
    Ok(ApiResponse::created(
        "Successfully to created a historySearch",
        history,
    ))
}

pub async fn delete_history_search(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    state
        .history
        .delete_history_search(auth.user_id, id)
        .await?;
    Ok(ApiResponse::ok("Successfully deleted historySearch", ()))
}

pub async fn list_history_seen_labs(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<PaginatedResponse<HistorySeenLabResponse>, AppError> {
    let seen = state
        .history
        .list_history_seen_labs(auth.user_id, &query)
        .await?;
    Ok(PaginatedResponse::ok(
        "Successfully get all historySeenLab",
        seen,
    ))
}
