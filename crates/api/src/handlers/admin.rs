//! Manual triggers for the background jobs. Useful for operations and for
//! catching up after downtime without waiting for the next tick.

use axum::{extract::State, Json};
use std::sync::Arc;

use mentorsync_core::models::maintenance::{MaintenanceReport, SweepReport};

use crate::{
    jobs::{SessionSweepJob, SlotMaintenanceJob},
    middleware::error_handling::AppError,
    ApiState,
};

#[axum::debug_handler]
pub async fn run_maintenance(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<MaintenanceReport>, AppError> {
    let job = SlotMaintenanceJob::new(state.db_pool.clone(), state.slot_window_days);
    let report = job.run().await?;
    Ok(Json(report))
}

#[axum::debug_handler]
pub async fn run_sweep(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<SweepReport>, AppError> {
    let job = SessionSweepJob::new(state.db_pool.clone());
    let report = job.run().await?;
    Ok(Json(report))
}
