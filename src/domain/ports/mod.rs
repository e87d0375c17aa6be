use crate::domain::models::{
    restaurant::Restaurant, schedule_rule::ScheduleRule, season::Season,
    exception_date::ExceptionDate, booking::{Booking, BookingStatus},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};

/// How a lookup inside an [`AvailabilitySession`] reads its rows.
///
/// `Exclusive` blocks concurrent admissions for the same restaurant until the
/// session commits or is dropped. It only protects anything when the booking
/// insert happens on the same session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    Shared,
    Exclusive,
}

#[async_trait]
pub trait ExceptionSource: Send {
    async fn find_exception(&mut self, restaurant_id: &str, date: NaiveDate, lock: LockMode) -> Result<Option<ExceptionDate>, AppError>;
}

#[async_trait]
pub trait RuleSource: Send {
    /// Available rules for the weekday, ordered by `start_time`. With `at`, only
    /// rules whose `[start_time, end_time)` contains it.
    async fn find_rules(&mut self, restaurant_id: &str, day_of_week: i32, at: Option<NaiveTime>, lock: LockMode) -> Result<Vec<ScheduleRule>, AppError>;
}

#[async_trait]
pub trait SeasonSource: Send {
    /// Active seasons whose inclusive date range contains `date`.
    async fn find_active_seasons(&mut self, restaurant_id: &str, date: NaiveDate) -> Result<Vec<Season>, AppError>;
}

#[async_trait]
pub trait OccupancySource: Send {
    /// Sum of `party_size` over pending and confirmed bookings at the slot.
    async fn committed_headcount(&mut self, restaurant_id: &str, date: NaiveDate, time: NaiveTime) -> Result<i64, AppError>;
}

pub trait AvailabilitySource: ExceptionSource + RuleSource + SeasonSource + OccupancySource {}

impl<T: ExceptionSource + RuleSource + SeasonSource + OccupancySource + ?Sized> AvailabilitySource for T {}

/// A database transaction scoped to one availability decision.
/// Dropping it without `commit` rolls everything back.
#[async_trait]
pub trait AvailabilitySession: AvailabilitySource {
    async fn insert_booking(&mut self, booking: &Booking) -> Result<Booking, AppError>;
    async fn commit(&mut self) -> Result<(), AppError>;
}

#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    async fn begin(&self) -> Result<Box<dyn AvailabilitySession>, AppError>;
}

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    async fn create(&self, restaurant: &Restaurant) -> Result<Restaurant, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, AppError>;
    async fn list(&self) -> Result<Vec<Restaurant>, AppError>;
}

#[async_trait]
pub trait ScheduleRuleRepository: Send + Sync {
    async fn create(&self, rule: &ScheduleRule) -> Result<ScheduleRule, AppError>;
    async fn find_by_id(&self, restaurant_id: &str, id: &str) -> Result<Option<ScheduleRule>, AppError>;
    async fn update(&self, rule: &ScheduleRule) -> Result<ScheduleRule, AppError>;
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<ScheduleRule>, AppError>;
    async fn delete(&self, restaurant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SeasonRepository: Send + Sync {
    async fn create(&self, season: &Season) -> Result<Season, AppError>;
    async fn find_by_id(&self, restaurant_id: &str, id: &str) -> Result<Option<Season>, AppError>;
    async fn update(&self, season: &Season) -> Result<Season, AppError>;
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Season>, AppError>;
    async fn delete(&self, restaurant_id: &str, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ExceptionDateRepository: Send + Sync {
    async fn upsert(&self, exception: &ExceptionDate) -> Result<ExceptionDate, AppError>;
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<ExceptionDate>, AppError>;
    async fn delete(&self, restaurant_id: &str, date: NaiveDate) -> Result<(), AppError>;
}

#[derive(Debug, Default, Clone)]
pub struct BookingFilter {
    pub restaurant_id: Option<String>,
    pub email: Option<String>,
    pub status: Option<BookingStatus>,
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;
    /// Moves the booking from `from` to `to` only if it is still in `from`;
    /// otherwise fails with `AppError::Conflict` and leaves the row untouched.
    async fn update_status(&self, id: &str, from: BookingStatus, to: BookingStatus) -> Result<Booking, AppError>;
}
