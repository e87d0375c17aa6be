use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{parse_date, ExceptionDateRequest};
use crate::api::handlers::restaurant::require_restaurant;
use crate::domain::models::exception_date::ExceptionDate;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn upsert_exception(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
    Json(payload): Json<ExceptionDateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = require_restaurant(&state, &restaurant_id).await?;

    let date = parse_date(&payload.date)?;
    if payload.capacity.is_some_and(|c| c < 0) {
        return Err(AppError::Validation("capacity must not be negative".into()));
    }

    let mut entity = ExceptionDate::new(restaurant.id, date);
    entity.reason = payload.reason.unwrap_or_default();
    entity.is_closed = payload.is_closed;
    entity.capacity = payload.capacity;

    let saved = state.exception_repo.upsert(&entity).await?;
    info!("Upserted exception for restaurant {} on {}", restaurant_id, date);
    Ok(Json(saved))
}

pub async fn list_exceptions(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_restaurant(&state, &restaurant_id).await?;
    Ok(Json(state.exception_repo.list_by_restaurant(&restaurant_id).await?))
}

pub async fn delete_exception(
    State(state): State<Arc<AppState>>,
    Path((restaurant_id, date_str)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let date = parse_date(&date_str)?;
    state.exception_repo.delete(&restaurant_id, date).await?;
    info!("Deleted exception for restaurant {} on {}", restaurant_id, date_str);
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
