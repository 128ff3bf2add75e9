//! Venue availability engine: HTTP API.
//!
//! Exposes the catalog and reservation contexts over JSON. The binary in
//! `main.rs` wires the `PostgreSQL` store and the GeoNames client into
//! [`state::AppState`] and serves [`build_router`].

use axum::Router;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use crate::config::AppConfig;
use crate::error::AppError;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

/// Builds the full route tree over `state`, without transport layers.
pub fn build_router(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/venues", routes::venues::router())
        .nest("/api/v1/reservations", routes::reservations::router())
        .with_state(state)
}

/// Opens the connection pool and applies pending migrations.
///
/// # Errors
///
/// Returns `AppError::Database` if the pool cannot connect, or
/// `AppError::Migration` if a migration fails.
pub async fn connect_database(config: &AppConfig) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;
    sqlx::migrate!("../../migrations").run(&pool).await?;
    Ok(pool)
}
