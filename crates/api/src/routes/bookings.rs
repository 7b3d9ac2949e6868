use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/bookings/initiate",
            post(handlers::bookings::initiate_reservation),
        )
        .route(
            "/api/bookings/commit",
            post(handlers::bookings::commit_reservation),
        )
}
