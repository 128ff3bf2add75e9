//! Adapter errors.

use thiserror::Error;
use venues_core::error::DomainError;

/// Failure of a GeoNames lookup.
#[derive(Debug, Error)]
pub enum GeolocationError {
    /// The request could not be sent or the body could not be decoded.
    #[error("geonames request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GeoNames answered with an error status (bad account, quota, ...).
    #[error("geonames error {code}: {message}")]
    Service {
        /// GeoNames status code.
        code: i32,
        /// GeoNames status message.
        message: String,
    },

    /// No populated place is known near the coordinates.
    #[error("no place found near ({latitude}, {longitude})")]
    NoPlaceFound {
        /// Queried latitude.
        latitude: f64,
        /// Queried longitude.
        longitude: f64,
    },
}

impl From<GeolocationError> for DomainError {
    fn from(error: GeolocationError) -> Self {
        Self::Geolocation(error.to_string())
    }
}
