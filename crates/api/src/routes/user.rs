use axum::{
    Router, middleware,
    routing::{delete, get, put},
};
use std::sync::Arc;

use crate::{ApiState, handlers, middleware::auth};

/// Routes for callers holding a `user` token.
pub fn routes(state: Arc<ApiState>) -> Router<Arc<ApiState>> {
    Router::new()
        .route("/user", get(handlers::account::get_user_credential))
        .route(
            "/user/update-profile",
            put(handlers::account::update_profile),
        )
        .route(
            "/user/update-password",
            put(handlers::account::update_password),
        )
        .route(
            "/user/notification",
            get(handlers::notification::get_notifications),
        )
        .route("/user/lab/search", get(handlers::lab::search_labs))
        .route("/user/lab/:id", get(handlers::lab::get_lab_as_user))
        .route("/user/jadwal/search", get(handlers::jadwal::search_jadwals))
        .route("/user/jadwal/:id", get(handlers::jadwal::get_jadwal_as_user))
        .route(
            "/user/peminjaman",
            get(handlers::peminjaman::list_peminjamans)
                .post(handlers::peminjaman::create_peminjaman),
        )
        .route(
            "/user/peminjaman/:id",
            get(handlers::peminjaman::get_peminjaman),
        )
        .route(
            "/user/history-search",
            get(handlers::history::list_history_searches)
                .post(handlers::history::create_history_search),
        )
        .route(
            "/user/history-search/:id",
            delete(handlers::history::delete_history_search),
        )
        .route(
            "/user/history-seen-lab",
            get(handlers::history::list_history_seen_labs),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::require_user))
}
