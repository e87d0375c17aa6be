use crate::domain::{models::exception_date::ExceptionDate, ports::ExceptionDateRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::NaiveDate;

pub struct SqliteExceptionDateRepo {
    pool: SqlitePool,
}

impl SqliteExceptionDateRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl ExceptionDateRepository for SqliteExceptionDateRepo {
    async fn upsert(&self, entity: &ExceptionDate) -> Result<ExceptionDate, AppError> {
        sqlx::query_as::<_, ExceptionDate>(
            r#"INSERT INTO exception_dates (id, restaurant_id, date, reason, is_closed, capacity, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               ON CONFLICT(restaurant_id, date) DO UPDATE SET
               reason=excluded.reason,
               is_closed=excluded.is_closed,
               capacity=excluded.capacity
               RETURNING *"#
        )
            .bind(&entity.id)
            .bind(&entity.restaurant_id)
            .bind(entity.date)
            .bind(&entity.reason)
            .bind(entity.is_closed)
            .bind(entity.capacity)
            .bind(entity.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<ExceptionDate>, AppError> {
        sqlx::query_as::<_, ExceptionDate>(
            "SELECT * FROM exception_dates WHERE restaurant_id = ? ORDER BY date ASC"
        )
            .bind(restaurant_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, restaurant_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let res = sqlx::query("DELETE FROM exception_dates WHERE restaurant_id = ? AND date = ?")
            .bind(restaurant_id)
            .bind(date)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if res.rows_affected() == 0 {
            return Err(AppError::NotFound("Exception date not found".into()));
        }
        Ok(())
    }
}
