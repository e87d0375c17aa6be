use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::CreateRestaurantRequest;
use crate::domain::models::restaurant::Restaurant;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_restaurant(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateRestaurantRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Restaurant name is required".into()));
    }

    let mut restaurant = Restaurant::new(name.to_string());
    if let Some(capacity) = payload.default_capacity {
        if capacity < 1 {
            return Err(AppError::Validation("default_capacity must be at least 1".into()));
        }
        restaurant.default_capacity = capacity;
    }
    restaurant.description = payload.description;
    restaurant.email = payload.email.unwrap_or_default();
    restaurant.phone = payload.phone.unwrap_or_default();
    restaurant.address = payload.address.unwrap_or_default();
    restaurant.city = payload.city.unwrap_or_default();
    restaurant.country = payload.country.unwrap_or_default();

    let created = state.restaurant_repo.create(&restaurant).await?;
    info!("Created restaurant {} ({})", created.name, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn list_restaurants(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    Ok(Json(state.restaurant_repo.list().await?))
}

pub async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = require_restaurant(&state, &restaurant_id).await?;
    Ok(Json(restaurant))
}

/// Looks the restaurant up or fails with `NotFound`.
pub async fn require_restaurant(state: &AppState, restaurant_id: &str) -> Result<Restaurant, AppError> {
    state.restaurant_repo.find_by_id(restaurant_id).await?
        .ok_or(AppError::NotFound("Restaurant not found".into()))
}
