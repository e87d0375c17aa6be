use chrono::NaiveDate;
use tracing::debug;
use crate::domain::models::exception_date::ExceptionDate;
use crate::domain::ports::{ExceptionSource, LockMode};
use crate::error::AppError;

/// Full-day override for `date`, if one exists. Absence is a normal outcome.
pub async fn resolve_exception<S>(
    source: &mut S,
    restaurant_id: &str,
    date: NaiveDate,
    lock: LockMode,
) -> Result<Option<ExceptionDate>, AppError>
where
    S: ExceptionSource + ?Sized,
{
    let exception = source.find_exception(restaurant_id, date, lock).await?;
    if let Some(ref e) = exception {
        debug!(restaurant_id, %date, is_closed = e.is_closed, capacity = ?e.capacity, "exception date found");
    }
    Ok(exception)
}
