//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use venues_api::build_router;
use venues_api::state::AppState;
use venues_store::PgVenueStore;
use venues_test_support::{FixedClock, StubGeolocation};

/// Fixed "now" used across all integration tests.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 10, 0).unwrap()
}

/// Build the full app router over a real `PgVenueStore`, a fixed clock and a
/// geolocation stub that places every caller in Split.
pub fn build_test_app(pool: PgPool) -> Router {
    let app_state = AppState::new(
        Arc::new(PgVenueStore::new(pool)),
        Arc::new(FixedClock(now())),
        Arc::new(StubGeolocation::new("Split", None)),
    );
    build_router(app_state)
}

/// Inserts two venue types, two users and two venues (Zagreb and Split).
pub async fn seed(pool: &PgPool) {
    sqlx::query("INSERT INTO venue_types (id, name) VALUES (1, 'Bar'), (2, 'Club')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO users (id, username) VALUES (1, 'ana'), (2, 'ivo')")
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO venues \
         (id, name, location, description, working_hours, maximum_capacity, venue_type_id, average_rating) \
         VALUES \
         (1, 'Jazz Bar', 'Zagreb', 'Live jazz', '18:00-02:00', 40, 1, 4.5), \
         (2, 'Rock Club', 'Split', 'Loud guitars', '20:00-04:00', 100, 2, 0)",
    )
    .execute(pool)
    .await
    .unwrap();
    sqlx::query("SELECT setval('venues_id_seq', 2)")
        .execute(pool)
        .await
        .unwrap();
}

/// Inserts a reservation and returns its id.
pub async fn reserve(
    pool: &PgPool,
    user_id: i32,
    venue_id: i32,
    at: DateTime<Utc>,
    guests: i32,
) -> i32 {
    sqlx::query_scalar(
        "INSERT INTO reservations (user_id, venue_id, datetime, number_of_guests) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(user_id)
    .bind(venue_id)
    .bind(at)
    .bind(guests)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn send(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "POST", uri, Some(body)).await
}

/// Send a PATCH request with a JSON body and return the response.
pub async fn patch_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, "PATCH", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "DELETE", uri, None).await
}
