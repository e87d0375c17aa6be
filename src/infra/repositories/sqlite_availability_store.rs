use crate::domain::models::{booking::Booking, exception_date::ExceptionDate, schedule_rule::ScheduleRule, season::Season};
use crate::domain::ports::{
    AvailabilitySession, AvailabilityStore, ExceptionSource, LockMode, OccupancySource, RuleSource, SeasonSource,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

pub struct SqliteAvailabilityStore {
    pool: SqlitePool,
}

impl SqliteAvailabilityStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for SqliteAvailabilityStore {
    async fn begin(&self) -> Result<Box<dyn AvailabilitySession>, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(Box::new(SqliteAvailabilitySession { tx: Some(tx), write_locked: false }))
    }
}

/// SQLite has no row locks. An exclusive read instead starts with a no-op
/// write on the restaurant row, which holds the database write lock until the
/// transaction ends; competing admissions wait on the busy timeout.
pub struct SqliteAvailabilitySession {
    tx: Option<Transaction<'static, Sqlite>>,
    write_locked: bool,
}

impl SqliteAvailabilitySession {
    fn conn(&mut self) -> Result<&mut SqliteConnection, AppError> {
        self.tx.as_deref_mut()
            .ok_or_else(|| AppError::InternalWithMsg("availability session used after commit".into()))
    }

    async fn acquire(&mut self, restaurant_id: &str, lock: LockMode) -> Result<(), AppError> {
        if lock == LockMode::Shared || self.write_locked {
            return Ok(());
        }
        sqlx::query("UPDATE restaurants SET default_capacity = default_capacity WHERE id = ?")
            .bind(restaurant_id)
            .execute(self.conn()?)
            .await
            .map_err(AppError::Database)?;
        self.write_locked = true;
        Ok(())
    }
}

#[async_trait]
impl ExceptionSource for SqliteAvailabilitySession {
    async fn find_exception(&mut self, restaurant_id: &str, date: NaiveDate, lock: LockMode) -> Result<Option<ExceptionDate>, AppError> {
        self.acquire(restaurant_id, lock).await?;
        sqlx::query_as::<_, ExceptionDate>("SELECT * FROM exception_dates WHERE restaurant_id = ? AND date = ?")
            .bind(restaurant_id)
            .bind(date)
            .fetch_optional(self.conn()?)
            .await
            .map_err(AppError::Database)
    }
}

#[async_trait]
impl RuleSource for SqliteAvailabilitySession {
    async fn find_rules(&mut self, restaurant_id: &str, day_of_week: i32, at: Option<NaiveTime>, lock: LockMode) -> Result<Vec<ScheduleRule>, AppError> {
        self.acquire(restaurant_id, lock).await?;
        match at {
            Some(time) => sqlx::query_as::<_, ScheduleRule>(
                "SELECT * FROM schedule_rules
                 WHERE restaurant_id = ? AND day_of_week = ? AND is_available = 1 AND start_time <= ? AND end_time > ?
                 ORDER BY start_time ASC"
            )
                .bind(restaurant_id).bind(day_of_week).bind(time).bind(time)
                .fetch_all(self.conn()?).await.map_err(AppError::Database),
            None => sqlx::query_as::<_, ScheduleRule>(
                "SELECT * FROM schedule_rules
                 WHERE restaurant_id = ? AND day_of_week = ? AND is_available = 1
                 ORDER BY start_time ASC"
            )
                .bind(restaurant_id).bind(day_of_week)
                .fetch_all(self.conn()?).await.map_err(AppError::Database),
        }
    }
}

#[async_trait]
impl SeasonSource for SqliteAvailabilitySession {
    async fn find_active_seasons(&mut self, restaurant_id: &str, date: NaiveDate) -> Result<Vec<Season>, AppError> {
        sqlx::query_as::<_, Season>(
            "SELECT * FROM seasons WHERE restaurant_id = ? AND is_active = 1 AND start_date <= ? AND end_date >= ?"
        )
            .bind(restaurant_id).bind(date).bind(date)
            .fetch_all(self.conn()?).await.map_err(AppError::Database)
    }
}

#[async_trait]
impl OccupancySource for SqliteAvailabilitySession {
    async fn committed_headcount(&mut self, restaurant_id: &str, date: NaiveDate, time: NaiveTime) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(party_size), 0) FROM bookings
             WHERE restaurant_id = ? AND date = ? AND time = ? AND status IN ('pending', 'confirmed')"
        )
            .bind(restaurant_id).bind(date).bind(time)
            .fetch_one(self.conn()?).await.map_err(AppError::Database)
    }
}

#[async_trait]
impl AvailabilitySession for SqliteAvailabilitySession {
    async fn insert_booking(&mut self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, restaurant_id, customer_name, customer_email, customer_phone, date, time, party_size, special_requests, status, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.restaurant_id).bind(&booking.customer_name).bind(&booking.customer_email)
            .bind(&booking.customer_phone).bind(booking.date).bind(booking.time).bind(booking.party_size)
            .bind(&booking.special_requests).bind(&booking.status).bind(booking.created_at)
            .fetch_one(self.conn()?).await.map_err(AppError::Database)
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        let tx = self.tx.take()
            .ok_or_else(|| AppError::InternalWithMsg("availability session committed twice".into()))?;
        tx.commit().await.map_err(AppError::Database)
    }
}
