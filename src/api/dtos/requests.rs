use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use crate::error::AppError;

pub fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format (YYYY-MM-DD): {}", value)))
}

pub fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| AppError::Validation(format!("Invalid time format (HH:MM): {}", value)))
}

#[derive(Deserialize)]
pub struct CreateRestaurantRequest {
    pub name: String,
    pub description: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub default_capacity: Option<i32>,
}

#[derive(Deserialize)]
pub struct CreateScheduleRuleRequest {
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub capacity: i32,
    pub is_available: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateScheduleRuleRequest {
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub capacity: Option<i32>,
    pub is_available: Option<bool>,
}

#[derive(Deserialize)]
pub struct CreateSeasonRequest {
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    pub capacity_multiplier: f64,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct UpdateSeasonRequest {
    pub name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub capacity_multiplier: Option<f64>,
    pub is_active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ExceptionDateRequest {
    pub date: String,
    pub reason: Option<String>,
    #[serde(default)]
    pub is_closed: bool,
    pub capacity: Option<i32>,
}

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub restaurant_id: String,
    pub date: String,
    pub time: Option<String>,
    pub num_people: Option<i32>,
}

#[derive(Deserialize)]
pub struct CheckSlotRequest {
    pub restaurant_id: String,
    pub date: String,
    pub time: String,
    pub num_people: i32,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub restaurant_id: String,
    pub date: String,
    pub time: String,
    pub party_size: i32,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub special_requests: Option<String>,
}

#[derive(Deserialize, Default)]
pub struct BookingListQuery {
    pub restaurant_id: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
}

#[derive(Deserialize)]
pub struct MyBookingsQuery {
    pub email: Option<String>,
}
