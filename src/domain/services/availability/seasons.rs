use chrono::NaiveDate;
use tracing::{debug, warn};
use crate::domain::models::season::Season;
use crate::domain::ports::SeasonSource;
use crate::error::AppError;

/// `floor(base * multiplier)`. Truncation, never rounding: 7 * 1.4 gives 9.
pub fn apply_multiplier(base_capacity: i32, multiplier: f64) -> i32 {
    (f64::from(base_capacity) * multiplier).floor() as i32
}

/// Picks the season that governs `date` among the active ones covering it.
/// The most recently created season wins; ties fall back to the greatest id.
pub fn select_season(mut candidates: Vec<Season>) -> Option<Season> {
    if candidates.len() > 1 {
        let names: Vec<&str> = candidates.iter().map(|s| s.name.as_str()).collect();
        warn!(?names, "several active seasons cover the same date; using the most recent");
    }
    candidates.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    candidates.pop()
}

/// Ceiling for a rule's base capacity on `date`, after the seasonal multiplier.
pub async fn resolve_multiplier<S>(
    source: &mut S,
    restaurant_id: &str,
    date: NaiveDate,
    base_capacity: i32,
) -> Result<i32, AppError>
where
    S: SeasonSource + ?Sized,
{
    let seasons = source.find_active_seasons(restaurant_id, date).await?;
    let Some(season) = select_season(seasons) else {
        return Ok(base_capacity);
    };

    let ceiling = apply_multiplier(base_capacity, season.capacity_multiplier);
    debug!(restaurant_id, season = %season.name, multiplier = season.capacity_multiplier, base_capacity, ceiling, "season applied");
    Ok(ceiling)
}
