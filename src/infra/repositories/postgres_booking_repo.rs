use crate::domain::{models::booking::{Booking, BookingStatus}, ports::{BookingFilter, BookingRepository}};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresBookingRepo {
    pool: PgPool,
}

impl PostgresBookingRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PostgresBookingRepo {
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError> {
        let status = filter.status.map(|s| s.as_str());
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE ($1::TEXT IS NULL OR restaurant_id = $1)
               AND ($2::TEXT IS NULL OR customer_email = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY date ASC, time ASC"
        )
            .bind(&filter.restaurant_id).bind(&filter.email).bind(status)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn update_status(&self, id: &str, from: BookingStatus, to: BookingStatus) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>("UPDATE bookings SET status = $1 WHERE id = $2 AND status = $3 RETURNING *")
            .bind(to.as_str()).bind(id).bind(from.as_str())
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict(format!("Booking is no longer {}", from)))
    }
}
