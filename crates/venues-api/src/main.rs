//! Venue availability API server entry point.

use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use venues_api::config::AppConfig;
use venues_api::error::AppError;
use venues_api::state::AppState;
use venues_core::clock::SystemClock;
use venues_geolocation::GeoNamesClient;
use venues_store::PgVenueStore;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting venue availability API server");

    let config = AppConfig::from_env()?;

    // Create database connection pool and bring the schema up to date.
    let pool = venues_api::connect_database(&config).await?;

    let geolocation = GeoNamesClient::new(config.geonames.clone())?;

    // Build application state.
    let app_state = AppState::new(
        Arc::new(PgVenueStore::new(pool)),
        Arc::new(SystemClock),
        Arc::new(geolocation),
    );

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = venues_api::build_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
