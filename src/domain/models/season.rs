use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use crate::error::AppError;

pub const MIN_MULTIPLIER: f64 = 0.1;
pub const MAX_MULTIPLIER: f64 = 10.0;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct Season {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub capacity_multiplier: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Season {
    pub fn new(
        restaurant_id: String,
        name: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        capacity_multiplier: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            name,
            start_date,
            end_date,
            capacity_multiplier,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("Season name is required".into()));
        }
        if self.start_date > self.end_date {
            return Err(AppError::Validation("start_date must not be after end_date".into()));
        }
        if !(MIN_MULTIPLIER..=MAX_MULTIPLIER).contains(&self.capacity_multiplier) {
            return Err(AppError::Validation(format!(
                "capacity_multiplier must be between {} and {}", MIN_MULTIPLIER, MAX_MULTIPLIER
            )));
        }
        Ok(())
    }

    /// Inclusive on both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
