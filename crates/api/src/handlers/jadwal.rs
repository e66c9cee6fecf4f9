use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
};

use labsched_core::{
    models::{JadwalInput, JadwalResponse, Viewer},
    pagination::ListQuery,
};

use crate::{
    ApiState,
    extract::{Json, Path},
    middleware::{auth::AuthUser, error_handling::AppError},
    response::{ApiResponse, PaginatedResponse},
};

pub async fn list_jadwals(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<PaginatedResponse<JadwalResponse>, AppError> {
    let jadwals = state.jadwals.list_jadwals(&query).await?;
    Ok(PaginatedResponse::ok("Successfully get all jadwals", jadwals))
}

pub async fn search_jadwals(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ListQuery>,
) -> Result<PaginatedResponse<JadwalResponse>, AppError> {
    let jadwals = state.jadwals.search_jadwal_available(&query).await?;
    Ok(PaginatedResponse::ok("Successfully get all jadwals", jadwals))
}

pub async fn get_jadwal(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<JadwalResponse>, AppError> {
    let jadwal = state.jadwals.get_jadwal_by_id(Viewer::Admin, id).await?;
    Ok(ApiResponse::ok("Successfully to get jadwal by id", jadwal))
}

pub async fn get_jadwal_as_user(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<JadwalResponse>, AppError> {
    let jadwal = state.jadwals.get_jadwal_by_id(auth.viewer(), id).await?;
    Ok(ApiResponse::ok("Successfully to get jadwal by id", jadwal))
}

pub async fn create_jadwal(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<JadwalInput>,
) -> Result<ApiResponse<JadwalResponse>, AppError> {
    let jadwal = state.jadwals.create_jadwal(payload).await?;
    Ok(ApiResponse::created("Successfully to created a jadwal", jadwal))
}

pub async fn update_jadwal(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
    Json(payload): Json<JadwalInput>,
) -> Result<ApiResponse<JadwalResponse>, AppError> {
    let jadwal = state.jadwals.update_jadwal(id, payload).await?;
    Ok(ApiResponse::ok("Successfully updated jadwal", jadwal))
}

pub async fn delete_jadwal(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    state.jadwals.delete_jadwal(id).await?;
    Ok(ApiResponse::ok("Successfully deleted jadwal", ()))
}
