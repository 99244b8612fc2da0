#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use maroc_hunt_api::{
    config::Config,
    create_router,
    services::{clock::FixedClock, AppState},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const HUNT_ID: &str = "marrakech-medina-adventure";
/// Group of 6 booked for 2024-03-25 09:00 at the venue (08:00 UTC).
pub const RESERVATION_ID: &str = "MAR1703847234";

pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

pub fn create_test_app_at(now: DateTime<Utc>) -> (Router, Arc<FixedClock>) {
    create_test_app_with(Config::default(), now)
}

pub fn create_test_app_with(config: Config, now: DateTime<Utc>) -> (Router, Arc<FixedClock>) {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let clock = Arc::new(FixedClock::new(now));
    let app_state = Arc::new(
        AppState::with_clock(config, clock.clone()).expect("Failed to initialize test app state"),
    );

    (create_router(app_state), clock)
}

/// Sends a request and returns the status with the body parsed as JSON, or
/// as a JSON string when the body is plain text.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, value)
}

pub async fn create_session(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/v1/sessions",
        Some(serde_json::json!({
            "hunt_id": HUNT_ID,
            "reservation_id": RESERVATION_ID,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "body: {}", body);
    body["session_id"].as_str().unwrap().to_string()
}

pub async fn answer(app: &Router, session_id: &str, text: &str) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        &format!("/api/v1/sessions/{}/answers", session_id),
        Some(serde_json::json!({ "answer": text })),
    )
    .await
}
