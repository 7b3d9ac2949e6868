use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/slots", post(handlers::slots::create_one_off_slot))
        .route(
            "/api/slots/recurring",
            post(handlers::slots::create_recurring_slots),
        )
        .route(
            "/api/mentors/:mentor_id/slots",
            get(handlers::slots::list_mentor_slots),
        )
}
