use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Slot times are rendered as `HH:MM` on the wire.
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

#[derive(Serialize)]
pub struct DaySlotsResponse {
    pub restaurant: String,
    pub date: NaiveDate,
    pub availability: Vec<String>,
}

#[derive(Serialize)]
pub struct SlotCheckResponse {
    pub restaurant: String,
    pub date: NaiveDate,
    pub time: String,
    pub num_people: i32,
    pub is_available: bool,
}
