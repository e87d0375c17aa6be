use crate::domain::{models::schedule_rule::ScheduleRule, ports::ScheduleRuleRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresScheduleRuleRepo {
    pool: PgPool,
}

impl PostgresScheduleRuleRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl ScheduleRuleRepository for PostgresScheduleRuleRepo {
    async fn create(&self, rule: &ScheduleRule) -> Result<ScheduleRule, AppError> {
        sqlx::query_as::<_, ScheduleRule>("INSERT INTO schedule_rules (id, restaurant_id, day_of_week, start_time, end_time, capacity, is_available, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *").bind(&rule.id).bind(&rule.restaurant_id).bind(rule.day_of_week).bind(rule.start_time).bind(rule.end_time).bind(rule.capacity).bind(rule.is_available).bind(rule.created_at).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, restaurant_id: &str, id: &str) -> Result<Option<ScheduleRule>, AppError> {
        sqlx::query_as::<_, ScheduleRule>("SELECT * FROM schedule_rules WHERE id = $1 AND restaurant_id = $2")
            .bind(id).bind(restaurant_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, rule: &ScheduleRule) -> Result<ScheduleRule, AppError> {
        sqlx::query_as::<_, ScheduleRule>(
            "UPDATE schedule_rules SET day_of_week=$1, start_time=$2, end_time=$3, capacity=$4, is_available=$5
             WHERE id=$6 AND restaurant_id=$7
             RETURNING *"
        )
            .bind(rule.day_of_week).bind(rule.start_time).bind(rule.end_time).bind(rule.capacity).bind(rule.is_available)
            .bind(&rule.id).bind(&rule.restaurant_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Schedule rule not found".into()))
    }
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<ScheduleRule>, AppError> {
        sqlx::query_as::<_, ScheduleRule>("SELECT * FROM schedule_rules WHERE restaurant_id = $1 ORDER BY day_of_week ASC, start_time ASC").bind(restaurant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, restaurant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM schedule_rules WHERE id = $1 AND restaurant_id = $2").bind(id).bind(restaurant_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Schedule rule not found".into())); }
        Ok(())
    }
}
