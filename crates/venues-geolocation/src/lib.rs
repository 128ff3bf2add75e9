//! Reverse geocoding against the GeoNames web service.
//!
//! [`GeoNamesClient`] implements `venues_core::geolocation::GeolocationService`
//! with the `findNearbyPlaceNameJSON` endpoint: one call resolves the
//! caller's city, another lists populated places within a radius.

mod client;
mod config;
mod error;
mod response;

pub use client::GeoNamesClient;
pub use config::GeoNamesConfig;
pub use error::GeolocationError;
