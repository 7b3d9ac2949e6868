use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/sessions/:session_id",
            get(handlers::sessions::get_session),
        )
        .route(
            "/api/sessions/:session_id/start",
            post(handlers::sessions::start_session),
        )
        .route(
            "/api/sessions/:session_id/complete",
            post(handlers::sessions::complete_session),
        )
        .route(
            "/api/sessions/:session_id/cancel",
            post(handlers::sessions::cancel_session),
        )
}
