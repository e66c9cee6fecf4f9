use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
};

use labsched_core::{
    models::{LabInput, LabResponse, Viewer},
    pagination::ListQuery,
};

use crate::{
    ApiState,
    extract::{Json, Path},
    middleware::{auth::AuthUser, error_handling::AppError},
    response::{ApiResponse, PaginatedResponse},
};

pub async fn list_labs(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<PaginatedResponse<LabResponse>, AppError> {
    let labs = state.labs.list_labs(&query).await?;
    Ok(PaginatedResponse::ok("Successfully get all labs", labs))
}

/// Public detail view; anonymous callers leave no seen-lab history.
pub async fn get_lab(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<LabResponse>, AppError> {
    let lab = state.labs.get_lab_by_id(Viewer::Admin, id).await?;
    Ok(ApiResponse::ok("Successfully to get lab by id", lab))
}

pub async fn search_labs(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<PaginatedResponse<LabResponse>, AppError> {
    let labs = state.labs.search_lab_available(auth.viewer(), &query).await?;
    Ok(PaginatedResponse::ok("Successfully get all labs", labs))
}

pub async fn get_lab_as_user(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<LabResponse>, AppError> {
    let lab = state.labs.get_lab_by_id(auth.viewer(), id).await?;
    Ok(ApiResponse::ok("Successfully to get lab by id", lab))
}

pub async fn create_lab(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<LabInput>,
) -> Result<ApiResponse<LabResponse>, AppError> {
    let lab = state.labs.create_lab(payload).await?;
    Ok(ApiResponse::created("Successfully to created a lab", lab))
}

pub async fn update_lab(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<LabInput>,
) -> Result<ApiResponse<LabResponse>, AppError> {
    let lab = state.labs.update_lab(id, payload).await?;
    Ok(ApiResponse::ok("Successfully updated lab", lab))
}

pub async fn delete_lab(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    state.labs.delete_lab(id).await?;
    Ok(ApiResponse::ok("Successfully deleted lab", ()))
}
