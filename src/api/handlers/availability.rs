use axum::{extract::{State, Query}, response::{IntoResponse, Response}, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{parse_date, parse_time, AvailabilityQuery, CheckSlotRequest};
use crate::api::dtos::responses::{format_time, DaySlotsResponse, SlotCheckResponse};
use crate::api::handlers::restaurant::require_restaurant;
use crate::error::AppError;
use std::sync::Arc;
use tracing::debug;

/// Without `time`, lists the open slots of the day; with it, checks that one slot.
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AvailabilityQuery>,
) -> Result<Response, AppError> {
    let date = parse_date(&params.date)?;
    let restaurant = require_restaurant(&state, &params.restaurant_id).await?;

    match params.time {
        Some(time_str) => {
            let time = parse_time(&time_str)?;
            let num_people = params.num_people.unwrap_or(state.availability.reference_party_size());
            let is_available = state.availability.is_available(&restaurant.id, date, time, num_people).await?;
            Ok(Json(SlotCheckResponse {
                restaurant: restaurant.id,
                date,
                time: format_time(time),
                num_people,
                is_available,
            }).into_response())
        }
        None => {
            let slots = state.availability.available_slots(&restaurant.id, date).await?;
            debug!("{} open slots for restaurant {} on {}", slots.len(), restaurant.id, date);
            Ok(Json(DaySlotsResponse {
                restaurant: restaurant.id,
                date,
                availability: slots.into_iter().map(format_time).collect(),
            }).into_response())
        }
    }
}

pub async fn check_slot(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CheckSlotRequest>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&payload.date)?;
    let time = parse_time(&payload.time)?;
    let restaurant = require_restaurant(&state, &payload.restaurant_id).await?;

    let is_available = state.availability.is_available(&restaurant.id, date, time, payload.num_people).await?;
    Ok(Json(SlotCheckResponse {
        restaurant: restaurant.id,
        date,
        time: format_time(time),
        num_people: payload.num_people,
        is_available,
    }))
}
