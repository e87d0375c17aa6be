use chrono::{Datelike, Duration as ChronoDuration, Utc, Weekday};
use colored::*;
use governor::{Quota, RateLimiter};
use hdrhistogram::Histogram;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

const DURATION_SECS: u64 = 20;
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const SLOT_CAPACITY: i64 = 40;
const STORM_REQUESTS: usize = 200;

struct Target {
    name: &'static str,
    method: &'static str,
    url: String,
    body: Option<serde_json::Value>,
}

#[tokio::main]
async fn main() {
    let base_url = std::env::var("BENCH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    println!("{}", "🚀 Starting Availability Benchmark".bold().green());
    println!("Target URL: {}", base_url);

    let client = Client::builder()
        .pool_max_idle_per_host(1000)
        .timeout(Duration::from_secs(10))
        .build()
        .unwrap();

    if client.get(format!("{}/health", base_url)).send().await.is_err() {
        eprintln!("{}", format!("❌ Server is NOT reachable at {}. Please start it first.", base_url).red().bold());
        return;
    }

    println!("\n{}", "⚙️  Setting up benchmark data...".yellow());
    let restaurant_id = setup_restaurant(&client, &base_url).await;
    let date = next_monday();

    println!("{}", "✅ Data created successfully.".green());
    println!("   Restaurant ID: {}", restaurant_id);
    println!("   Date:          {}", date);

    let targets = vec![
        Target {
            name: "Health Check",
            method: "GET",
            url: format!("{}/health", base_url),
            body: None,
        },
        Target {
            name: "Day Slots (Read)",
            method: "GET",
            url: format!("{}/api/v1/availability?restaurant_id={}&date={}", base_url, restaurant_id, date),
            body: None,
        },
        Target {
            name: "Check Slot (Read)",
            method: "POST",
            url: format!("{}/api/v1/availability/check-slot", base_url),
            body: Some(json!({
                "restaurant_id": restaurant_id,
                "date": date,
                "time": "19:00",
                "num_people": 4
            })),
        },
    ];

    let rps_stages = vec![10, 50, 200, 1000];

    for target in targets {
        println!("\n{}", "=".repeat(60));
        println!("Benchmarking Endpoint: {}", target.name.cyan().bold());
        println!("URL: {}", target.url);
        println!("{}", "=".repeat(60));

        println!("{:<10} | {:<15} | {:<15} | {:<15}", "RPS", "Mean (ms)", "P99 (ms)", "Success Rate");
        println!("{:-<10}-+-{:-<15}-+-{:-<15}-+-{:-<15}", "", "", "", "");

        for &rps in &rps_stages {
            run_stage(&client, &target, rps).await;
        }
    }

    booking_storm(&client, &base_url, &restaurant_id, &date).await;
}

fn next_monday() -> String {
    let mut day = Utc::now().date_naive() + ChronoDuration::days(1);
    while day.weekday() != Weekday::Mon {
        day += ChronoDuration::days(1);
    }
    day.format("%Y-%m-%d").to_string()
}

async fn setup_restaurant(client: &Client, base_url: &str) -> String {
    let res = client.post(format!("{}/api/v1/restaurants", base_url))
        .json(&json!({ "name": "Benchmark Bistro", "city": "Loadtown" }))
        .send()
        .await
        .expect("Failed to send restaurant create request");

    if !res.status().is_success() {
        panic!("Failed to create restaurant: status {}", res.status());
    }

    let body: Value = res.json().await.expect("Failed to parse restaurant response");
    let id = body["id"].as_str().expect("No restaurant id").to_string();

    for day_of_week in 0..7 {
        let res = client.post(format!("{}/api/v1/restaurants/{}/rules", base_url, id))
            .json(&json!({
                "day_of_week": day_of_week,
                "start_time": "11:00",
                "end_time": "23:00",
                "capacity": SLOT_CAPACITY
            }))
            .send()
            .await
            .expect("Failed to create schedule rule");

        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().await.unwrap_or_default();
            panic!("Failed to create schedule rule. Status: {}. Body: {}", status, txt);
        }
    }

    id
}

async fn run_stage(client: &Client, target: &Target, rps: u32) {
    let limiter = Arc::new(RateLimiter::direct(
        Quota::per_second(NonZeroU32::new(rps).unwrap())
    ));

    let (tx, mut rx) = mpsc::channel(50000);
    let start_time = Instant::now();
    let duration = Duration::from_secs(DURATION_SECS);

    loop {
        if start_time.elapsed() > duration {
            break;
        }

        if limiter.check().is_ok() {
            let client = client.clone();
            let url = target.url.clone();
            let body = target.body.clone();
            let method = target.method;
            let tx = tx.clone();

            tokio::spawn(async move {
                let req_start = Instant::now();
                let res = match method {
                    "POST" => {
                        let mut req = client.post(&url);
                        if let Some(b) = body {
                            req = req.json(&b);
                        }
                        req.send().await
                    },
                    _ => client.get(&url).send().await,
                };
                let latency = req_start.elapsed();

                let success = match res {
                    Ok(r) => r.status().is_success(),
                    Err(_) => false,
                };

                let _ = tx.send((latency, success)).await;
            });
        } else {
            tokio::task::yield_now().await;
        }
    }

    drop(tx);

    let mut histogram = Histogram::<u64>::new(3).unwrap();
    let mut successes = 0;
    let mut total = 0;

    while let Some((latency, success)) = rx.recv().await {
        total += 1;
        if success { successes += 1; }
        histogram.record(latency.as_micros() as u64).unwrap();
    }

    let mean_ms = histogram.mean() / 1000.0;
    let p99_ms = histogram.value_at_quantile(0.99) as f64 / 1000.0;
    let success_rate = if total > 0 { (successes as f64 / total as f64) * 100.0 } else { 0.0 };

    println!(
        "{:<10} | {:<15.2} | {:<15.2} | {:<14.1}%",
        rps,
        mean_ms,
        p99_ms,
        success_rate
    );

    tokio::time::sleep(Duration::from_millis(500)).await;
}

/// Fires simultaneous two-person bookings at one slot and verifies the
/// committed headcount stays within the rule's capacity.
async fn booking_storm(client: &Client, base_url: &str, restaurant_id: &str, date: &str) {
    println!("\n{}", "=".repeat(60));
    println!("Booking Storm: {} concurrent requests at {} 20:00", STORM_REQUESTS.to_string().cyan().bold(), date);
    println!("{}", "=".repeat(60));

    let start = Instant::now();
    let mut set = JoinSet::new();
    for i in 0..STORM_REQUESTS {
        let client = client.clone();
        let url = format!("{}/api/v1/bookings", base_url);
        let payload = json!({
            "restaurant_id": restaurant_id,
            "date": date,
            "time": "20:00",
            "party_size": 2,
            "customer_name": format!("Storm Guest {}", i),
            "customer_email": format!("storm{}@bench.local", i),
        });
        set.spawn(async move {
            client.post(&url).json(&payload).send().await.map(|r| r.status())
        });
    }

    let (mut admitted, mut rejected, mut failed) = (0, 0, 0);
    while let Some(res) = set.join_next().await {
        match res {
            Ok(Ok(StatusCode::CREATED)) => admitted += 1,
            Ok(Ok(StatusCode::CONFLICT)) => rejected += 1,
            _ => failed += 1,
        }
    }
    println!("Admitted: {}  Rejected: {}  Failed: {}  ({:.2}s)", admitted, rejected, failed, start.elapsed().as_secs_f64());

    let bookings: Value = client.get(format!("{}/api/v1/bookings?restaurant_id={}", base_url, restaurant_id))
        .send()
        .await
        .expect("Failed to list bookings")
        .json()
        .await
        .expect("Failed to parse bookings");

    let seated: i64 = bookings.as_array().map(|list| {
        list.iter()
            .filter(|b| b["date"] == date && b["time"].as_str().is_some_and(|t| t.starts_with("20:00")))
            .filter(|b| matches!(b["status"].as_str(), Some("pending") | Some("confirmed")))
            .filter_map(|b| b["party_size"].as_i64())
            .sum()
    }).unwrap_or(0);

    if seated <= SLOT_CAPACITY {
        println!("{}", format!("✅ Seated {} of {} (capacity held)", seated, SLOT_CAPACITY).green().bold());
    } else {
        println!("{}", format!("❌ Seated {} of {} (OVERBOOKED)", seated, SLOT_CAPACITY).red().bold());
    }
}
