use axum::{extract::State, Json};
use std::sync::Arc;

use mentorsync_core::models::session::{
    CommitReservationRequest, InitiateReservationRequest, ReservationOffer, SessionBooking,
};

use crate::{middleware::error_handling::AppError, services, ApiState};

#[axum::debug_handler]
pub async fn initiate_reservation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<InitiateReservationRequest>,
) -> Result<Json<ReservationOffer>, AppError> {
    let offer = services::booking::initiate_reservation(
        &state.db_pool,
        state.payment.as_ref(),
        payload.user_id,
        payload.time_slot_id,
    )
    .await?;
    Ok(Json(offer))
}

#[axum::debug_handler]
pub async fn commit_reservation(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CommitReservationRequest>,
) -> Result<Json<SessionBooking>, AppError> {
    let booking =
        services::booking::commit_reservation(&state.db_pool, state.payment.as_ref(), &payload)
            .await?;
    Ok(Json(booking))
}
