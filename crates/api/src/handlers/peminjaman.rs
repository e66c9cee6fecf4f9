use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
};

use labsched_core::{
    models::{PeminjamanInput, PeminjamanResponse},
    pagination::ListQuery,
};

use crate::{
    ApiState,
    extract::{Json, Path},
    middleware::{auth::AuthUser, error_handling::AppError},
    response::{ApiResponse, PaginatedResponse},
};

/// Users get their own bookings, admins get every booking.
pub async fn list_peminjamans(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Query(query): Query<ListQuery>,
) -> Result<PaginatedResponse<PeminjamanResponse>, AppError> {
    let peminjamans = state
        .peminjaman
        .list_peminjamans(auth.viewer(), &query)
        .await?;
    Ok(PaginatedResponse::ok(
        "Successfully get all peminjamans",
        peminjamans,
    ))
}

pub async fn get_peminjaman(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<PeminjamanResponse>, AppError> {
    let peminjaman = state
        .peminjaman
        .get_peminjaman_by_id(auth.viewer(), id)
        .await?;
    Ok(ApiResponse::ok(
        "Successfully to get peminjaman by id",
        peminjaman,
    ))
}

pub async fn create_peminjaman(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Json(payload): Json<PeminjamanInput>,
) -> Result<ApiResponse<PeminjamanResponse>, AppError> {
    let peminjaman = state
        .peminjaman
        .create_peminjaman(auth.user_id, payload)
        .await?;
    Ok(ApiResponse::created(
        "Successfully to created a peminjaman",
        peminjaman,
    ))
}

pub async fn update_peminjaman(
    State(state): State<Arc<ApiState>>,
    Extension(auth): Extension<AuthUser>,
    Path(id): Path<i64>,
    Json(payload): Json<PeminjamanInput>,
) -> Result<ApiResponse<PeminjamanResponse>, AppError> {
    let peminjaman = state
        .peminjaman
        .update_peminjaman(auth.viewer(), id, payload)
        .await?;
    Ok(ApiResponse::ok("Successfully updated peminjaman", peminjaman))
}

pub async fn delete_peminjaman(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<i64>,
) -> Result<ApiResponse<()>, AppError> {
    state.peminjaman.delete_peminjaman(id).await?;
    Ok(ApiResponse::ok("Successfully deleted peminjaman", ()))
}
