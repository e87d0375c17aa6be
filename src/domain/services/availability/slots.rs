use chrono::{Duration, NaiveDate, NaiveTime};
use crate::error::AppError;

pub const DEFAULT_INTERVAL_MIN: i64 = 15;

/// Every `start + k * interval` strictly before `end`.
///
/// The count is derived from the window length up front, so the result is
/// always finite. A non-positive interval is rejected.
pub fn enumerate_slots(
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
    interval_minutes: i64,
) -> Result<Vec<NaiveTime>, AppError> {
    if interval_minutes <= 0 {
        return Err(AppError::Validation(format!(
            "Slot interval must be positive, got {} minutes", interval_minutes
        )));
    }

    let start = date.and_time(start_time);
    let window = (date.and_time(end_time) - start).num_seconds();
    if window <= 0 {
        return Ok(Vec::new());
    }

    // An interval spanning the whole window leaves only the opening slot.
    let Some(step) = interval_minutes.checked_mul(60).filter(|s| *s < window) else {
        return Ok(vec![start_time]);
    };
    let count = window / step + i64::from(window % step != 0);
    Ok((0..count)
        .map(|k| (start + Duration::seconds(k * step)).time())
        .collect())
}
