use std::env;
use std::fmt::Display;
use std::str::FromStr;
use crate::domain::services::availability::{slots::DEFAULT_INTERVAL_MIN, DEFAULT_REFERENCE_PARTY_SIZE};

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub slot_interval_min: i64,
    pub reference_party_size: i32,
    pub db_max_connections: Option<u32>, // Backend default when unset
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            slot_interval_min: env::var("SLOT_INTERVAL_MIN")
                .map(|v| parse_positive("SLOT_INTERVAL_MIN", &v))
                .unwrap_or(DEFAULT_INTERVAL_MIN),
            reference_party_size: env::var("REFERENCE_PARTY_SIZE")
                .map(|v| parse_positive("REFERENCE_PARTY_SIZE", &v))
                .unwrap_or(DEFAULT_REFERENCE_PARTY_SIZE),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .map(|v| parse_positive("DB_MAX_CONNECTIONS", &v)),
        }
    }
}

/// Aborts startup unless `raw` is a number greater than zero.
fn parse_positive<T>(name: &str, raw: &str) -> T
where
    T: FromStr + PartialOrd + Default + Display,
{
    let value: T = raw.trim().parse().unwrap_or_else(|_| panic!("{} must be a number, got {:?}", name, raw));
    if value <= T::default() {
        panic!("{} must be positive, got {}", name, value);
    }
    value
}
