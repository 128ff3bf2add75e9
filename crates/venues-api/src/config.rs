//! Environment-driven configuration, read once at startup.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use venues_geolocation::GeoNamesConfig;

use crate::error::AppError;

/// Server, database and geolocation settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` connection string (`DATABASE_URL`, required).
    pub database_url: String,
    /// Pool size (`DATABASE_MAX_CONNECTIONS`, default 10).
    pub database_max_connections: u32,
    /// Bind host (`HOST`, default `0.0.0.0`).
    pub host: String,
    /// Bind port (`PORT`, default 3000).
    pub port: u16,
    /// GeoNames client settings (`GEONAMES_BASE_URL`, `GEONAMES_USERNAME`,
    /// `GEONAMES_MAX_ROWS`, `GEOLOCATION_TIMEOUT_SECS`).
    pub geonames: GeoNamesConfig,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a value
    /// does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `DATABASE_URL` is missing or a value
    /// does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let database_url = lookup("DATABASE_URL").ok_or_else(|| {
            AppError::Config("DATABASE_URL environment variable must be set".to_owned())
        })?;

        let defaults = GeoNamesConfig::default();
        let geonames = GeoNamesConfig {
            base_url: lookup("GEONAMES_BASE_URL").unwrap_or(defaults.base_url),
            username: lookup("GEONAMES_USERNAME").unwrap_or(defaults.username),
            max_rows: parsed(&lookup, "GEONAMES_MAX_ROWS", defaults.max_rows)?,
            timeout: Duration::from_secs(parsed(
                &lookup,
                "GEOLOCATION_TIMEOUT_SECS",
                defaults.timeout.as_secs(),
            )?),
        };

        Ok(Self {
            database_url,
            database_max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_owned()),
            port: parsed(&lookup, "PORT", 3000)?,
            geonames,
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if host and port do not form a socket
    /// address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn parsed<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .parse()
            .map_err(|e| AppError::Config(format!("{key} is not valid: {e}"))),
        None => Ok(default),
    }
}
