//! HTTP client for GeoNames.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use venues_core::error::DomainError;
use venues_core::geolocation::GeolocationService;

use crate::config::GeoNamesConfig;
use crate::error::GeolocationError;
use crate::response::NearbyPlacesResponse;

const NEARBY_PLACE_PATH: &str = "/findNearbyPlaceNameJSON";

/// Populated places with at least 15 000 inhabitants.
const CITY_FILTER: &str = "cities15000";

/// GeoNames-backed [`GeolocationService`].
#[derive(Debug, Clone)]
pub struct GeoNamesClient {
    http_client: Client,
    config: GeoNamesConfig,
}

impl GeoNamesClient {
    /// Creates a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns `GeolocationError::Request` if the HTTP client cannot be built.
    pub fn new(config: GeoNamesConfig) -> Result<Self, GeolocationError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http_client,
            config,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{NEARBY_PLACE_PATH}",
            self.config.base_url.trim_end_matches('/')
        )
    }

    fn city_query(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("lat", latitude.to_string()),
            ("lng", longitude.to_string()),
            ("username", self.config.username.clone()),
        ]
    }

    fn nearby_query(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Vec<(&'static str, String)> {
        let mut query = self.city_query(latitude, longitude);
        query.extend([
            ("radius", radius_km.to_string()),
            ("maxRows", self.config.max_rows.to_string()),
            ("cities", CITY_FILTER.to_owned()),
        ]);
        query
    }

    async fn place_names(
        &self,
        query: &[(&'static str, String)],
    ) -> Result<Vec<String>, GeolocationError> {
        let response: NearbyPlacesResponse = self
            .http_client
            .get(self.endpoint())
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        response.into_place_names()
    }
}

#[async_trait]
impl GeolocationService for GeoNamesClient {
    #[instrument(skip(self))]
    async fn city_for_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<String, DomainError> {
        let city = self
            .place_names(&self.city_query(latitude, longitude))
            .await?
            .into_iter()
            .next()
            .ok_or(GeolocationError::NoPlaceFound {
                latitude,
                longitude,
            })?;
        debug!(%city, "resolved current city");
        Ok(city)
    }

    #[instrument(skip(self))]
    async fn nearby_cities_within(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Option<Vec<String>>, DomainError> {
        let cities = self
            .place_names(&self.nearby_query(latitude, longitude, radius_km))
            .await?;
        debug!(count = cities.len(), "resolved nearby cities");
        Ok(Some(cities).filter(|cities| !cities.is_empty()))
    }
}
