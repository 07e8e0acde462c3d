#![allow(dead_code)]

use std::sync::{Arc, Once};

use serde_json::{Value, json};
use tokio::net::TcpListener;
use velora::app_with_repository;
use velora::models::{DaySchedule, TimeOfDay, TimeRange, WeeklySchedule};
use velora::services::repository::InMemoryScheduleRepository;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("velora=debug")
            .with_test_writer()
            .init();
    });
}

/// Spawns the application on a random port with in-memory storage and
/// returns its address.
///
/// Returned address format: `http://127.0.0.1:8492`
pub async fn spawn_app() -> String {
    init_tracing_once();

    // Randomly choose an available port
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port at localhost");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let app = app_with_repository(Arc::new(InMemoryScheduleRepository::new()));
        axum::serve(listener, app).await.unwrap();
    });

    let address = format!("http://127.0.0.1:{port}");

    // Wait for server to be ready
    let client = reqwest::Client::new();
    for _ in 0..10 {
        if client
            .get(format!("{address}/health-check"))
            .send()
            .await
            .is_ok()
        {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    address
}

/// A day schedule with the given open flag and custom working hours.
pub fn day_with_hours(open: bool, start: TimeOfDay, end: TimeOfDay) -> DaySchedule {
    let mut day = DaySchedule::with_default_hours(open);
    day.hours = TimeRange::new(start, end);
    day
}

/// Body for the weekly save endpoint.
pub fn weekly_body(version: i64, weekly: &WeeklySchedule) -> Value {
    json!({ "version": version, "weekly": weekly })
}

/// Body for the override save endpoint.
pub fn override_body(version: i64, unavailable: bool, start: &str, end: &str) -> Value {
    json!({
        "version": version,
        "override": {
            "unavailable": unavailable,
            "hours": { "start": start, "end": end },
            "break": { "enabled": false, "start": "13:00", "end": "14:00" }
        }
    })
}
