//! # Error Handling Middleware
//!
//! Maps `LabError` onto HTTP status codes and the error envelope
//! `{status_code, message, errors}`. Rule violations and missing records are
//! both client errors (400); any token or role problem is a 401.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use labsched_core::errors::LabError;

/// Wraps `LabError` so handlers can return `Result<_, AppError>` and use `?`.
#[derive(Debug)]
pub struct AppError(pub LabError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            LabError::NotFound(_) | LabError::Validation(_) => StatusCode::BAD_REQUEST,
            LabError::Authentication(_) | LabError::Authorization(_) => StatusCode::UNAUTHORIZED,
            LabError::Database(_) | LabError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let body = Json(json!({
            "status_code": status.as_u16(),
            "message": status.canonical_reason().unwrap_or("Error"),
            "errors": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}

impl From<LabError> for AppError {
    fn from(err: LabError) -> Self {
        AppError(err)
    }
}

impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(LabError::Database(err))
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError(LabError::validation(rejection.body_text()))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(LabError::validation(rejection.body_text()))
    }
}
