use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/login", post(handlers::account::login))
        .route("/register", post(handlers::account::register))
        .route("/public/lab", get(handlers::lab::list_labs))
        .route("/public/lab/:id", get(handlers::lab::get_lab))
        .route("/public/jadwal", get(handlers::jadwal::list_jadwals))
        .route("/public/jadwal/:id", get(handlers::jadwal::get_jadwal))
        .route(
            "/public/template-message",
            get(handlers::notification::list_template_messages)
                .post(handlers::notification::create_template_message),
        )
        .route(
            "/public/template-message/:id",
            get(handlers::notification::get_template_message)
                .put(handlers::notification::update_template_message),
        )
}
