use crate::domain::{models::restaurant::Restaurant, ports::RestaurantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteRestaurantRepo {
    pool: SqlitePool,
}

impl SqliteRestaurantRepo {
    pub fn new(pool: SqlitePool) -> Self { Self { pool } }
}

#[async_trait]
impl RestaurantRepository for SqliteRestaurantRepo {
    async fn create(&self, r: &Restaurant) -> Result<Restaurant, AppError> {
        sqlx::query_as::<_, Restaurant>(
            "INSERT INTO restaurants (id, name, description, email, phone, address, city, country, default_capacity, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&r.id).bind(&r.name).bind(&r.description).bind(&r.email).bind(&r.phone)
            .bind(&r.address).bind(&r.city).bind(&r.country).bind(r.default_capacity).bind(r.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, AppError> {
        sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Restaurant>, AppError> {
        sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
