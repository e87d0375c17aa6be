use restaurant_availability::{
    api::router::create_router,
    state::AppState,
    config::Config,
    infra::factory::sqlite_state,
    domain::services::availability::{slots::DEFAULT_INTERVAL_MIN, DEFAULT_REFERENCE_PARTY_SIZE},
};
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    Router,
};
use std::str::FromStr;
use tower::ServiceExt;
use serde_json::{json, Value};

/// 2026-02-09 is a Monday (day_of_week 0).
pub const MONDAY: &str = "2026-02-09";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(10))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            slot_interval_min: DEFAULT_INTERVAL_MIN,
            reference_party_size: DEFAULT_REFERENCE_PARTY_SIZE,
            db_max_connections: None,
        };

        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(payload) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string())),
            None => builder.body(Body::empty()),
        }.unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap_or(Value::Null) };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn create_restaurant(&self, name: &str) -> String {
        let (status, body) = self.post("/api/v1/restaurants", json!({"name": name})).await;
        assert_eq!(status, StatusCode::CREATED, "create restaurant failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn add_rule(&self, restaurant_id: &str, day_of_week: i32, start: &str, end: &str, capacity: i32) -> String {
        let (status, body) = self.post(
            &format!("/api/v1/restaurants/{}/rules", restaurant_id),
            json!({"day_of_week": day_of_week, "start_time": start, "end_time": end, "capacity": capacity}),
        ).await;
        assert_eq!(status, StatusCode::CREATED, "create rule failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn add_season(&self, restaurant_id: &str, start: &str, end: &str, multiplier: f64) -> String {
        let (status, body) = self.post(
            &format!("/api/v1/restaurants/{}/seasons", restaurant_id),
            json!({"name": "Season", "start_date": start, "end_date": end, "capacity_multiplier": multiplier}),
        ).await;
        assert_eq!(status, StatusCode::CREATED, "create season failed: {}", body);
        body["id"].as_str().unwrap().to_string()
    }

    pub async fn add_exception(&self, restaurant_id: &str, payload: Value) {
        let (status, body) = self.post(&format!("/api/v1/restaurants/{}/exceptions", restaurant_id), payload).await;
        assert_eq!(status, StatusCode::OK, "upsert exception failed: {}", body);
    }

    pub async fn book(&self, restaurant_id: &str, date: &str, time: &str, party_size: i32, email: &str) -> (StatusCode, Value) {
        self.post("/api/v1/bookings", json!({
            "restaurant_id": restaurant_id,
            "date": date,
            "time": time,
            "party_size": party_size,
            "customer_name": "Test Guest",
            "customer_email": email,
        })).await
    }

    pub async fn is_available(&self, restaurant_id: &str, date: &str, time: &str, num_people: i32) -> bool {
        let (status, body) = self.get(&format!(
            "/api/v1/availability?restaurant_id={}&date={}&time={}&num_people={}",
            restaurant_id, date, time, num_people
        )).await;
        assert_eq!(status, StatusCode::OK, "availability check failed: {}", body);
        body["is_available"].as_bool().unwrap()
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}
