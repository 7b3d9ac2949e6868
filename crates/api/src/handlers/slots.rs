use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use mentorsync_core::models::time_slot::{
    CreateOneOffSlotRequest, CreateRecurringSlotsRequest, GenerationResponse, SlotWindowQuery,
    TimeSlot,
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, services, ApiState};

#[axum::debug_handler]
pub async fn create_one_off_slot(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateOneOffSlotRequest>,
) -> Result<Json<TimeSlot>, AppError> {
    let slot = services::slots::create_one_off_slot(&state.db_pool, &payload).await?;
    Ok(Json(slot))
}

#[axum::debug_handler]
pub async fn create_recurring_slots(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateRecurringSlotsRequest>,
) -> Result<Json<GenerationResponse>, AppError> {
    let response = services::slots::generate_recurring_slots(&state.db_pool, &payload).await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn list_mentor_slots(
    State(state): State<Arc<ApiState>>,
    Path(mentor_id): Path<Uuid>,
    Query(query): Query<SlotWindowQuery>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let slots = services::slots::list_mentor_slots(&state.db_pool, mentor_id, &query).await?;
    Ok(Json(slots))
}
