use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers, middleware::auth};

/// Routes for callers holding an `admin` token.
pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route("/admin/user", get(handlers::account::list_users))
        .route("/admin/user/:id", delete(handlers::account::delete_user))
        .route("/admin/dashboard", get(handlers::dashboard::get_dashboard))
        .route(
            "/admin/dashboard/filter",
            get(handlers::dashboard::get_dashboard_by_month),
        )
        .route("/admin/lab", post(handlers::lab::create_lab))
        .route(
            "/admin/lab/:id",
            put(handlers::lab::update_lab).delete(handlers::lab::delete_lab),
        )
        .route("/admin/jadwal", post(handlers::jadwal::create_jadwal))
        .route(
            "/admin/jadwal/:id",
            put(handlers::jadwal::update_jadwal).delete(handlers::jadwal::delete_jadwal),
        )
        .route(
            "/admin/peminjaman",
            get(handlers::peminjaman::list_peminjamans),
        )
        .route(
            "/admin/peminjaman/:id",
            get(handlers::peminjaman::get_peminjaman)
                .put(handlers::peminjaman::update_peminjaman)
                .delete(handlers::peminjaman::delete_peminjaman),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require_admin))
}
