use axum::{extract::{State, Path, Query}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{parse_date, parse_time, BookingListQuery, CreateBookingRequest, MyBookingsQuery};
use crate::api::handlers::restaurant::require_restaurant;
use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams};
use crate::domain::ports::BookingFilter;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.party_size < 1 {
        return Err(AppError::Validation("party_size must be at least 1".into()));
    }
    if payload.customer_name.trim().is_empty() {
        return Err(AppError::Validation("customer_name is required".into()));
    }
    if payload.customer_email.trim().is_empty() {
        return Err(AppError::Validation("customer_email is required".into()));
    }
    let date = parse_date(&payload.date)?;
    let time = parse_time(&payload.time)?;
    let restaurant = require_restaurant(&state, &payload.restaurant_id).await?;

    let booking = Booking::new(NewBookingParams {
        restaurant_id: restaurant.id,
        date,
        time,
        party_size: payload.party_size,
        name: payload.customer_name.trim().to_string(),
        email: payload.customer_email.trim().to_string(),
        phone: payload.customer_phone,
        special_requests: payload.special_requests,
    });

    let created = state.availability.book(&booking).await?;
    info!("Booking {} created for {} on {} {}", created.id, created.restaurant_id, created.date, created.time);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BookingListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = BookingFilter {
        restaurant_id: params.restaurant_id,
        email: params.email,
        status: params.status.as_deref().map(str::parse::<BookingStatus>).transpose()?,
    };
    Ok(Json(state.booking_repo.list(&filter).await?))
}

pub async fn my_bookings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MyBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let email = params.email
        .filter(|e| !e.trim().is_empty())
        .ok_or(AppError::Validation("email required".into()))?;

    let filter = BookingFilter { email: Some(email), ..Default::default() };
    Ok(Json(state.booking_repo.list(&filter).await?))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(require_booking(&state, &booking_id).await?))
}

pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    transition(&state, &booking_id, BookingStatus::confirm).await
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    transition(&state, &booking_id, BookingStatus::cancel).await
}

pub async fn complete_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    transition(&state, &booking_id, BookingStatus::complete).await
}

async fn require_booking(state: &AppState, booking_id: &str) -> Result<Booking, AppError> {
    state.booking_repo.find_by_id(booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))
}

async fn transition(
    state: &AppState,
    booking_id: &str,
    step: fn(BookingStatus) -> Result<BookingStatus, AppError>,
) -> Result<Json<Booking>, AppError> {
    let booking = require_booking(state, booking_id).await?;
    let current = booking.status()?;
    let next = step(current)?;
    // Conditional on `current`: a concurrent transition makes this a Conflict.
    let updated = state.booking_repo.update_status(&booking.id, current, next).await?;
    info!("Booking {} moved from {} to {}", booking.id, current, next);
    Ok(Json(updated))
}
