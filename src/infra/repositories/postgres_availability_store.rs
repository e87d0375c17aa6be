use crate::domain::models::{booking::Booking, exception_date::ExceptionDate, schedule_rule::ScheduleRule, season::Season};
use crate::domain::ports::{
    AvailabilitySession, AvailabilityStore, ExceptionSource, LockMode, OccupancySource, RuleSource, SeasonSource,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

pub struct PostgresAvailabilityStore {
    pool: PgPool,
}

impl PostgresAvailabilityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for PostgresAvailabilityStore {
    async fn begin(&self) -> Result<Box<dyn AvailabilitySession>, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::Database)?;
        Ok(Box::new(PostgresAvailabilitySession { tx: Some(tx) }))
    }
}

/// Exclusive reads use `SELECT ... FOR UPDATE` on the exception and rule rows.
pub struct PostgresAvailabilitySession {
    tx: Option<Transaction<'static, Postgres>>,
}

impl PostgresAvailabilitySession {
    fn conn(&mut self) -> Result<&mut PgConnection, AppError> {
        self.tx.as_deref_mut()
            .ok_or_else(|| AppError::InternalWithMsg("availability session used after commit".into()))
    }
}

fn locking(sql: &str, lock: LockMode) -> String {
    match lock {
        LockMode::Shared => sql.to_string(),
        LockMode::Exclusive => format!("{} FOR UPDATE", sql),
    }
}

#[async_trait]
impl ExceptionSource for PostgresAvailabilitySession {
    async fn find_exception(&mut self, restaurant_id: &str, date: NaiveDate, lock: LockMode) -> Result<Option<ExceptionDate>, AppError> {
        let sql = locking("SELECT * FROM exception_dates WHERE restaurant_id = $1 AND date = $2", lock);
        sqlx::query_as::<_, ExceptionDate>(&sql)
            .bind(restaurant_id)
            .bind(date)
            .fetch_optional(self.conn()?)
            .await
            .map_err(AppError::Database)
    }
}

#[async_trait]
impl RuleSource for PostgresAvailabilitySession {
    async fn find_rules(&mut self, restaurant_id: &str, day_of_week: i32, at: Option<NaiveTime>, lock: LockMode) -> Result<Vec<ScheduleRule>, AppError> {
        match at {
            Some(time) => {
                let sql = locking(
                    "SELECT * FROM schedule_rules
                     WHERE restaurant_id = $1 AND day_of_week = $2 AND is_available AND start_time <= $3 AND end_time > $3
                     ORDER BY start_time ASC", lock);
                sqlx::query_as::<_, ScheduleRule>(&sql)
                    .bind(restaurant_id).bind(day_of_week).bind(time)
                    .fetch_all(self.conn()?).await.map_err(AppError::Database)
            }
            None => {
                let sql = locking(
                    "SELECT * FROM schedule_rules
                     WHERE restaurant_id = $1 AND day_of_week = $2 AND is_available
                     ORDER BY start_time ASC", lock);
                sqlx::query_as::<_, ScheduleRule>(&sql)
                    .bind(restaurant_id).bind(day_of_week)
                    .fetch_all(self.conn()?).await.map_err(AppError::Database)
            }
        }
    }
}

#[async_trait]
impl SeasonSource for PostgresAvailabilitySession {
    async fn find_active_seasons(&mut self, restaurant_id: &str, date: NaiveDate) -> Result<Vec<Season>, AppError> {
        sqlx::query_as::<_, Season>(
            "SELECT * FROM seasons WHERE restaurant_id = $1 AND is_active AND start_date <= $2 AND end_date >= $2"
        )
            .bind(restaurant_id).bind(date)
            .fetch_all(self.conn()?).await.map_err(AppError::Database)
    }
}

#[async_trait]
impl OccupancySource for PostgresAvailabilitySession {
    async fn committed_headcount(&mut self, restaurant_id: &str, date: NaiveDate, time: NaiveTime) -> Result<i64, AppError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(party_size), 0)::BIGINT FROM bookings
             WHERE restaurant_id = $1 AND date = $2 AND time = $3 AND status IN ('pending', 'confirmed')"
        )
            .bind(restaurant_id).bind(date).bind(time)
            .fetch_one(self.conn()?).await.map_err(AppError::Database)
    }
}

#[async_trait]
impl AvailabilitySession for PostgresAvailabilitySession {
    async fn insert_booking(&mut self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, restaurant_id, customer_name, customer_email, customer_phone, date, time, party_size, special_requests, status, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
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
