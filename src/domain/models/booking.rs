use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
        }
    }

    /// Whether a booking in this status holds seats.
    pub fn counts_toward_occupancy(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }

    pub fn confirm(self) -> Result<Self, AppError> {
        match self {
            BookingStatus::Pending => Ok(BookingStatus::Confirmed),
            _ => Err(AppError::Validation("Only pending bookings can be confirmed".into())),
        }
    }

    pub fn cancel(self) -> Result<Self, AppError> {
        match self {
            BookingStatus::Completed => Err(AppError::Validation("A completed booking cannot be cancelled".into())),
            _ => Ok(BookingStatus::Cancelled),
        }
    }

    pub fn complete(self) -> Result<Self, AppError> {
        match self {
            BookingStatus::Confirmed => Ok(BookingStatus::Completed),
            _ => Err(AppError::Validation("Only confirmed bookings can be completed".into())),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "completed" => Ok(BookingStatus::Completed),
            other => Err(AppError::Validation(format!("Unknown booking status: {}", other))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub restaurant_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub special_requests: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

pub struct NewBookingParams {
    pub restaurant_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub party_size: i32,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub special_requests: Option<String>,
}

impl Booking {
    pub fn new(params: NewBookingParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            restaurant_id: params.restaurant_id,
            customer_name: params.name,
            customer_email: params.email,
            customer_phone: params.phone.unwrap_or_default(),
            date: params.date,
            time: params.time,
            party_size: params.party_size,
            special_requests: params.special_requests,
            status: BookingStatus::Pending.as_str().to_string(),
            created_at: Utc::now(),
        }
    }

    pub fn status(&self) -> Result<BookingStatus, AppError> {
        self.status.parse()
            .map_err(|_| AppError::InternalWithMsg(format!("Booking {} has corrupt status {:?}", self.id, self.status)))
    }
}
