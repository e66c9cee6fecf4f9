use std::sync::Arc;

use axum::extract::{Query, State};

use labsched_core::{
    errors::LabError,
    models::{DashboardFilterQuery, DashboardFilterResponse, DashboardResponse},
};

use crate::{ApiState, middleware::error_handling::AppError, response::ApiResponse};

pub async fn get_dashboard(
    State(state): State<Arc<ApiState>>,
) -> Result<ApiResponse<DashboardResponse>, AppError> {
    let dashboard = state.dashboard.dashboard_get_all().await?;
    Ok(ApiResponse::ok("Successfully get all dashboards", dashboard))
}

fn parse_number(field: &str, value: Option<&str>) -> Result<i64, LabError> {
    let raw = value.map(str::trim).unwrap_or_default();
    raw.parse()
        .map_err(|_| LabError::validation(format!("invalid {} '{}'", field, raw)))
}

pub async fn get_dashboard_by_month(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<DashboardFilterQuery>,
) -> Result<ApiResponse<DashboardFilterResponse>, AppError> {
    let month = parse_number("month", query.month.as_deref())?;
    let year = parse_number("year", query.year.as_deref())?;

    let dashboard = state.dashboard.dashboard_get_by_month(month, year).await?;
    Ok(ApiResponse::ok(
        "Successfully get dashboards by month",
        dashboard,
    ))
}
