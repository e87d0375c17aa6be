use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{parse_time, CreateScheduleRuleRequest, UpdateScheduleRuleRequest};
use crate::api::handlers::restaurant::require_restaurant;
use crate::domain::models::schedule_rule::ScheduleRule;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_rule(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
    Json(payload): Json<CreateScheduleRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = require_restaurant(&state, &restaurant_id).await?;

    let start = parse_time(&payload.start_time)?;
    let end = parse_time(&payload.end_time)?;
    let mut rule = ScheduleRule::new(restaurant.id, payload.day_of_week, start, end, payload.capacity);
    rule.is_available = payload.is_available.unwrap_or(true);
    rule.validate()?;

    let created = state.rule_repo.create(&rule).await?;
    info!("Created schedule rule {} for restaurant {}", created.id, restaurant_id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Partial update; omitted fields keep their stored values.
pub async fn update_rule(
    State(state): State<Arc<AppState>>,
    Path((restaurant_id, rule_id)): Path<(String, String)>,
    Json(payload): Json<UpdateScheduleRuleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut rule = state.rule_repo.find_by_id(&restaurant_id, &rule_id).await?
        .ok_or(AppError::NotFound("Schedule rule not found".into()))?;

    if let Some(day_of_week) = payload.day_of_week {
        rule.day_of_week = day_of_week;
    }
    if let Some(start) = payload.start_time {
        rule.start_time = parse_time(&start)?;
    }
    if let Some(end) = payload.end_time {
        rule.end_time = parse_time(&end)?;
    }
    if let Some(capacity) = payload.capacity {
        rule.capacity = capacity;
    }
    if let Some(is_available) = payload.is_available {
        rule.is_available = is_available;
    }
    rule.validate()?;

    let updated = state.rule_repo.update(&rule).await?;
    info!("Updated schedule rule {} for restaurant {}", rule_id, restaurant_id);
    Ok(Json(updated))
}

pub async fn list_rules(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_restaurant(&state, &restaurant_id).await?;
    Ok(Json(state.rule_repo.list_by_restaurant(&restaurant_id).await?))
}

pub async fn delete_rule(
    State(state): State<Arc<AppState>>,
    Path((restaurant_id, rule_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.rule_repo.delete(&restaurant_id, &rule_id).await?;
    info!("Deleted schedule rule {} for restaurant {}", rule_id, restaurant_id);
    Ok(StatusCode::NO_CONTENT)
}
