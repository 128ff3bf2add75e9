//! Geolocation collaborator contract.

use async_trait::async_trait;

use crate::error::DomainError;

/// Resolves coordinates to city names.
///
/// Implementations report lookup failures as `DomainError::Geolocation` and do
/// not retry.
#[async_trait]
pub trait GeolocationService: Send + Sync {
    /// Returns the city containing the coordinates.
    async fn city_for_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, DomainError>;

    /// Returns the cities within `radius_km` of the coordinates, or `None`
    /// when the provider has nothing for that area.
    async fn nearby_cities_within(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Option<Vec<String>>, DomainError>;
}
