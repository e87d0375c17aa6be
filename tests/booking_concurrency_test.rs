mod common;

use axum::{body::Body, http::{header, Request, StatusCode}, Router};
use common::{TestApp, MONDAY};
use restaurant_availability::{
    api::router::create_router,
    config::Config,
    domain::services::availability::{slots::DEFAULT_INTERVAL_MIN, DEFAULT_REFERENCE_PARTY_SIZE},
    infra::factory::bootstrap_state,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::task::JoinSet;
use tower::ServiceExt;

async fn post(router: Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = router.oneshot(
        Request::builder().method("POST").uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

/// Fires `attempts` simultaneous two-person bookings at Monday 19:00 and
/// returns how many were admitted.
async fn booking_storm(router: Router, restaurant_id: &str, attempts: usize) -> usize {
    let mut set = JoinSet::new();
    for i in 0..attempts {
        let router = router.clone();
        let payload = json!({
            "restaurant_id": restaurant_id,
            "date": MONDAY,
            "time": "19:00",
            "party_size": 2,
            "customer_name": format!("Guest {}", i),
            "customer_email": format!("guest{}@example.com", i),
        });
        set.spawn(async move { post(router, "/api/v1/bookings", payload).await });
    }

    let mut admitted = 0;
    while let Some(res) = set.join_next().await {
        let (status, body) = res.expect("Task panicked");
        match status {
            StatusCode::CREATED => admitted += 1,
            StatusCode::CONFLICT => {}
            other => panic!("Unexpected status {} ({})", other, body),
        }
    }
    admitted
}

#[tokio::test]
async fn test_concurrent_bookings_never_exceed_capacity_sqlite() {
    let app = Arc::new(TestApp::new().await);
    let rid = app.create_restaurant("Race").await;
    app.add_rule(&rid, 0, "18:00", "22:00", 10).await;

    let admitted = booking_storm(app.router.clone(), &rid, 20).await;
    assert_eq!(admitted, 5);

    let seated: i64 = sqlx::query_scalar(
        "SELECT COALESCE(SUM(party_size), 0) FROM bookings WHERE restaurant_id = ? AND status IN ('pending', 'confirmed')"
    )
        .bind(&rid)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(seated, 10);
    assert!(!app.is_available(&rid, MONDAY, "19:00", 1).await);
}

/// Races confirm and cancel of a full-slot booking against a new booking for
/// the seats a cancel would free.
#[tokio::test]
async fn test_lifecycle_race_keeps_cancels_and_capacity_sqlite() {
    let app = Arc::new(TestApp::new().await);
    let rid = app.create_restaurant("Lifecycle Race").await;
    app.add_rule(&rid, 0, "18:00", "22:00", 2).await;

    for k in 0..16 {
        let minutes = k * 15;
        let time = format!("{:02}:{:02}", 18 + minutes / 60, minutes % 60);

        let (status, booking) = app.book(&rid, MONDAY, &time, 2, "first@example.com").await;
        assert_eq!(status, StatusCode::CREATED, "{}", booking);
        let id = booking["id"].as_str().unwrap().to_string();

        let mut set = JoinSet::new();
        for action in ["confirm", "cancel"] {
            let router = app.router.clone();
            let uri = format!("/api/v1/bookings/{}/{}", id, action);
            set.spawn(async move { (action, post(router, &uri, json!({})).await.0) });
        }
        let router = app.router.clone();
        let payload = json!({
            "restaurant_id": rid, "date": MONDAY, "time": time, "party_size": 2,
            "customer_name": "Second", "customer_email": "second@example.com",
        });
        set.spawn(async move { ("book", post(router, "/api/v1/bookings", payload).await.0) });

        let mut outcomes = Vec::new();
        while let Some(res) = set.join_next().await {
            outcomes.push(res.expect("Task panicked"));
        }
        let status_of = |name: &str| outcomes.iter().find(|(a, _)| *a == name).map(|(_, s)| *s).unwrap();

        let confirm = status_of("confirm");
        let cancel = status_of("cancel");
        assert!(matches!(confirm, StatusCode::OK | StatusCode::BAD_REQUEST | StatusCode::CONFLICT), "confirm gave {}", confirm);
        assert!(matches!(cancel, StatusCode::OK | StatusCode::CONFLICT), "cancel gave {}", cancel);
        assert!(confirm == StatusCode::OK || cancel == StatusCode::OK, "neither transition applied at {}", time);

        let (_, first) = app.get(&format!("/api/v1/bookings/{}", id)).await;
        if cancel == StatusCode::OK {
            assert_eq!(first["status"], "cancelled", "acknowledged cancel lost at {}", time);
        }

        let seated: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(party_size), 0) FROM bookings
             WHERE restaurant_id = ? AND time = ? AND status IN ('pending', 'confirmed')"
        )
            .bind(&rid)
            .bind(chrono::NaiveTime::parse_from_str(&time, "%H:%M").unwrap())
            .fetch_one(&app.pool)
            .await
            .unwrap();
        assert!(seated <= 2, "slot {} seats {} of 2", time, seated);
    }
}

#[tokio::test]
async fn test_concurrent_bookings_never_exceed_capacity_postgres() {
    let db_url = std::env::var("DATABASE_URL").unwrap_or_default();
    if !db_url.starts_with("postgres") {
        println!("Skipping concurrency test (not targeting Postgres)");
        return;
    }

    let config = Config {
        database_url: db_url,
        port: 0,
        slot_interval_min: DEFAULT_INTERVAL_MIN,
        reference_party_size: DEFAULT_REFERENCE_PARTY_SIZE,
        db_max_connections: Some(20),
    };
    let router = create_router(Arc::new(bootstrap_state(&config).await));

    let (status, restaurant) = post(router.clone(), "/api/v1/restaurants", json!({"name": "Race PG"})).await;
    assert_eq!(status, StatusCode::CREATED);
    let rid = restaurant["id"].as_str().unwrap().to_string();

    let (status, _) = post(router.clone(), &format!("/api/v1/restaurants/{}/rules", rid), json!({
        "day_of_week": 0, "start_time": "18:00", "end_time": "22:00", "capacity": 10
    })).await;
    assert_eq!(status, StatusCode::CREATED);

    let admitted = booking_storm(router, &rid, 40).await;
    assert_eq!(admitted, 5);
}
