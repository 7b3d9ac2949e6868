use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/admin/maintenance/run",
            post(handlers::admin::run_maintenance),
        )
        .route("/api/admin/sweep/run", post(handlers::admin::run_sweep))
}
