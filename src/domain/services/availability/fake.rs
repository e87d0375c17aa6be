//! In-memory stand-in for the database, used by the engine's unit tests.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::sync::{Arc, Mutex};
use crate::domain::models::{
    booking::{Booking, BookingStatus}, exception_date::ExceptionDate,
    schedule_rule::ScheduleRule, season::Season,
};
use crate::domain::ports::{
    AvailabilitySession, AvailabilityStore, ExceptionSource, LockMode, OccupancySource,
    RuleSource, SeasonSource,
};
use crate::error::AppError;

#[derive(Default, Clone)]
pub struct FakeStore {
    pub exceptions: Vec<ExceptionDate>,
    pub rules: Vec<ScheduleRule>,
    pub seasons: Vec<Season>,
    pub bookings: Vec<Booking>,
    pub unreachable: bool,
    pub exclusive_reads: usize,
    pub committed: bool,
}

impl FakeStore {
    fn reachable(&self) -> Result<(), AppError> {
        if self.unreachable {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }

    fn note_lock(&mut self, lock: LockMode) {
        if lock == LockMode::Exclusive {
            self.exclusive_reads += 1;
        }
    }
}

#[async_trait]
impl ExceptionSource for FakeStore {
    async fn find_exception(&mut self, restaurant_id: &str, date: NaiveDate, lock: LockMode) -> Result<Option<ExceptionDate>, AppError> {
        self.reachable()?;
        self.note_lock(lock);
        Ok(self.exceptions.iter()
            .find(|e| e.restaurant_id == restaurant_id && e.date == date)
            .cloned())
    }
}

#[async_trait]
impl RuleSource for FakeStore {
    async fn find_rules(&mut self, restaurant_id: &str, day_of_week: i32, at: Option<NaiveTime>, lock: LockMode) -> Result<Vec<ScheduleRule>, AppError> {
        self.reachable()?;
        self.note_lock(lock);
        let mut rules: Vec<ScheduleRule> = self.rules.iter()
            .filter(|r| r.restaurant_id == restaurant_id && r.day_of_week == day_of_week && r.is_available)
            .filter(|r| at.is_none_or(|t| r.covers(t)))
            .cloned()
            .collect();
        rules.sort_by_key(|r| r.start_time);
        Ok(rules)
    }
}

#[async_trait]
impl SeasonSource for FakeStore {
    async fn find_active_seasons(&mut self, restaurant_id: &str, date: NaiveDate) -> Result<Vec<Season>, AppError> {
        self.reachable()?;
        Ok(self.seasons.iter()
            .filter(|s| s.restaurant_id == restaurant_id && s.is_active && s.contains(date))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl OccupancySource for FakeStore {
    async fn committed_headcount(&mut self, restaurant_id: &str, date: NaiveDate, time: NaiveTime) -> Result<i64, AppError> {
        self.reachable()?;
        Ok(self.bookings.iter()
            .filter(|b| b.restaurant_id == restaurant_id && b.date == date && b.time == time)
            .filter(|b| b.status.parse::<BookingStatus>().is_ok_and(|s| s.counts_toward_occupancy()))
            .map(|b| b.party_size as i64)
            .sum())
    }
}

#[async_trait]
impl AvailabilitySession for FakeStore {
    async fn insert_booking(&mut self, booking: &Booking) -> Result<Booking, AppError> {
        self.reachable()?;
        self.bookings.push(booking.clone());
        Ok(booking.clone())
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        self.committed = true;
        Ok(())
    }
}

/// Hands out sessions over a shared [`FakeStore`]; committed bookings are
/// written back, uncommitted sessions leave no trace.
#[derive(Default, Clone)]
pub struct SharedFakeStore {
    pub inner: Arc<Mutex<FakeStore>>,
}

impl SharedFakeStore {
    pub fn new(store: FakeStore) -> Self {
        Self { inner: Arc::new(Mutex::new(store)) }
    }

    pub fn snapshot(&self) -> FakeStore {
        self.inner.lock().unwrap().clone()
    }
}

struct FakeSession {
    working: FakeStore,
    shared: Arc<Mutex<FakeStore>>,
}

#[async_trait]
impl ExceptionSource for FakeSession {
    async fn find_exception(&mut self, restaurant_id: &str, date: NaiveDate, lock: LockMode) -> Result<Option<ExceptionDate>, AppError> {
        self.working.find_exception(restaurant_id, date, lock).await
    }
}

#[async_trait]
impl RuleSource for FakeSession {
    async fn find_rules(&mut self, restaurant_id: &str, day_of_week: i32, at: Option<NaiveTime>, lock: LockMode) -> Result<Vec<ScheduleRule>, AppError> {
        self.working.find_rules(restaurant_id, day_of_week, at, lock).await
    }
}

#[async_trait]
impl SeasonSource for FakeSession {
    async fn find_active_seasons(&mut self, restaurant_id: &str, date: NaiveDate) -> Result<Vec<Season>, AppError> {
        self.working.find_active_seasons(restaurant_id, date).await
    }
}

#[async_trait]
impl OccupancySource for FakeSession {
    async fn committed_headcount(&mut self, restaurant_id: &str, date: NaiveDate, time: NaiveTime) -> Result<i64, AppError> {
        self.working.committed_headcount(restaurant_id, date, time).await
    }
}

#[async_trait]
impl AvailabilitySession for FakeSession {
    async fn insert_booking(&mut self, booking: &Booking) -> Result<Booking, AppError> {
        self.working.insert_booking(booking).await
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        let mut shared = self.shared.lock().unwrap();
        shared.bookings = self.working.bookings.clone();
        shared.exclusive_reads += self.working.exclusive_reads;
        shared.committed = true;
        Ok(())
    }
}

#[async_trait]
impl AvailabilityStore for SharedFakeStore {
    async fn begin(&self) -> Result<Box<dyn AvailabilitySession>, AppError> {
        let working = self.snapshot();
        working.reachable()?;
        Ok(Box::new(FakeSession { working, shared: self.inner.clone() }))
    }
}

pub fn monday() -> NaiveDate {
    let date = NaiveDate::from_ymd_opt(2026, 2, 9).unwrap();
    debug_assert_eq!(date.weekday().num_days_from_monday(), 0);
    date
}

pub fn at(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}
