use crate::domain::{models::season::Season, ports::SeasonRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSeasonRepo {
    pool: PgPool,
}

impl PostgresSeasonRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl SeasonRepository for PostgresSeasonRepo {
    async fn create(&self, season: &Season) -> Result<Season, AppError> {
        sqlx::query_as::<_, Season>("INSERT INTO seasons (id, restaurant_id, name, start_date, end_date, capacity_multiplier, is_active, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *").bind(&season.id).bind(&season.restaurant_id).bind(&season.name).bind(season.start_date).bind(season.end_date).bind(season.capacity_multiplier).bind(season.is_active).bind(season.created_at).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, restaurant_id: &str, id: &str) -> Result<Option<Season>, AppError> {
        sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE id = $1 AND restaurant_id = $2")
            .bind(id).bind(restaurant_id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn update(&self, season: &Season) -> Result<Season, AppError> {
        sqlx::query_as::<_, Season>(
            "UPDATE seasons SET name=$1, start_date=$2, end_date=$3, capacity_multiplier=$4, is_active=$5
             WHERE id=$6 AND restaurant_id=$7
             RETURNING *"
        )
            .bind(&season.name).bind(season.start_date).bind(season.end_date).bind(season.capacity_multiplier).bind(season.is_active)
            .bind(&season.id).bind(&season.restaurant_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Season not found".into()))
    }
    async fn list_by_restaurant(&self, restaurant_id: &str) -> Result<Vec<Season>, AppError> {
        sqlx::query_as::<_, Season>("SELECT * FROM seasons WHERE restaurant_id = $1 ORDER BY start_date ASC").bind(restaurant_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }
    async fn delete(&self, restaurant_id: &str, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM seasons WHERE id = $1 AND restaurant_id = $2").bind(id).bind(restaurant_id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Season not found".into())); }
        Ok(())
    }
}
