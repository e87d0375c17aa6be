use crate::domain::{models::restaurant::Restaurant, ports::RestaurantRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresRestaurantRepo {
    pool: PgPool,
}

impl PostgresRestaurantRepo {
    pub fn new(pool: PgPool) -> Self { Self { pool } }
}

#[async_trait]
impl RestaurantRepository for PostgresRestaurantRepo {
    async fn create(&self, r: &Restaurant) -> Result<Restaurant, AppError> {
        sqlx::query_as::<_, Restaurant>("INSERT INTO restaurants (id, name, description, email, phone, address, city, country, default_capacity, created_at) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) RETURNING *").bind(&r.id).bind(&r.name).bind(&r.description).bind(&r.email).bind(&r.phone).bind(&r.address).bind(&r.city).bind(&r.country).bind(r.default_capacity).bind(r.created_at).fetch_one(&self.pool).await.map_err(AppError::Database)
    }
    async fn find_by_id(&self, id: &str) -> Result<Option<Restaurant>, AppError> {
        sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = $1").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
    async fn list(&self) -> Result<Vec<Restaurant>, AppError> {
        sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants ORDER BY name ASC").fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
