use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

pub const DEFAULT_CAPACITY: i32 = 50;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub default_capacity: i32,
    pub created_at: DateTime<Utc>,
}

impl Restaurant {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description: None,
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            default_capacity: DEFAULT_CAPACITY,
            created_at: Utc::now(),
        }
    }
}
