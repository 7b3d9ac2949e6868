use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

use mentorsync_core::models::session::{
    CancelSessionRequest, CompleteSessionRequest, SessionBooking,
};

use crate::{middleware::error_handling::AppError, services, ApiState};

#[axum::debug_handler]
pub async fn get_session(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionBooking>, AppError> {
    let session = services::lifecycle::get_session(&state.db_pool, session_id).await?;
    Ok(Json(session))
}

#[axum::debug_handler]
pub async fn start_session(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionBooking>, AppError> {
    let session =
        services::lifecycle::start_session(&state.db_pool, session_id, Utc::now()).await?;
    Ok(Json(session))
}

#[axum::debug_handler]
pub async fn complete_session(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CompleteSessionRequest>,
) -> Result<Json<SessionBooking>, AppError> {
    let session = services::lifecycle::complete_session(
        &state.db_pool,
        session_id,
        Utc::now(),
        payload.reason,
    )
    .await?;
    Ok(Json(session))
}

#[axum::debug_handler]
pub async fn cancel_session(
    State(state): State<Arc<ApiState>>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<CancelSessionRequest>,
) -> Result<Json<SessionBooking>, AppError> {
    let session = services::lifecycle::cancel_session(
        &state.db_pool,
        session_id,
        &payload.reason,
        Utc::now(),
    )
    .await?;
    Ok(Json(session))
}
