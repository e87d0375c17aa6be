use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Full-day override for one restaurant. Either a closure or a replacement ceiling.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone, PartialEq)]
pub struct ExceptionDate {
    pub id: String,
    pub restaurant_id: String,
    pub date: NaiveDate,
    pub reason: String,
    pub is_closed: bool,
    pub capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl ExceptionDate {
    pub fn new(restaurant_id: String, date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            restaurant_id,
            date,
            reason: String::new(),
            is_closed: false,
            capacity: None,
            created_at: Utc::now(),
        }
    }
}
