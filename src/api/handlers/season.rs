use axum::{extract::{State, Path}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{parse_date, CreateSeasonRequest, UpdateSeasonRequest};
use crate::api::handlers::restaurant::require_restaurant;
use crate::domain::models::season::Season;
use crate::error::AppError;
use std::sync::Arc;
use tracing::info;

pub async fn create_season(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
    Json(payload): Json<CreateSeasonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let restaurant = require_restaurant(&state, &restaurant_id).await?;

    let start = parse_date(&payload.start_date)?;
    let end = parse_date(&payload.end_date)?;
    let mut season = Season::new(restaurant.id, payload.name, start, end, payload.capacity_multiplier);
    season.is_active = payload.is_active.unwrap_or(true);
    season.validate()?;

    let created = state.season_repo.create(&season).await?;
    info!("Created season {} for restaurant {}", created.name, restaurant_id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_season(
    State(state): State<Arc<AppState>>,
    Path((restaurant_id, season_id)): Path<(String, String)>,
    Json(payload): Json<UpdateSeasonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut season = state.season_repo.find_by_id(&restaurant_id, &season_id).await?
        .ok_or(AppError::NotFound("Season not found".into()))?;

    if let Some(name) = payload.name {
        season.name = name;
    }
    if let Some(start) = payload.start_date {
        season.start_date = parse_date(&start)?;
    }
    if let Some(end) = payload.end_date {
        season.end_date = parse_date(&end)?;
    }
    if let Some(multiplier) = payload.capacity_multiplier {
        season.capacity_multiplier = multiplier;
    }
    if let Some(is_active) = payload.is_active {
        season.is_active = is_active;
    }
    season.validate()?;

    let updated = state.season_repo.update(&season).await?;
    info!("Updated season {} for restaurant {}", season_id, restaurant_id);
    Ok(Json(updated))
}

pub async fn list_seasons(
    State(state): State<Arc<AppState>>,
    Path(restaurant_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    require_restaurant(&state, &restaurant_id).await?;
    Ok(Json(state.season_repo.list_by_restaurant(&restaurant_id).await?))
}

pub async fn delete_season(
    State(state): State<Arc<AppState>>,
    Path((restaurant_id, season_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.season_repo.delete(&restaurant_id, &season_id).await?;
    info!("Deleted season {} for restaurant {}", season_id, restaurant_id);
    Ok(StatusCode::NO_CONTENT)
}
