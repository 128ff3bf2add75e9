//! Test geolocation services.

use std::sync::Mutex;

use async_trait::async_trait;
use venues_core::error::DomainError;
use venues_core::geolocation::GeolocationService;

/// A geolocation service with canned answers that counts its calls.
#[derive(Debug)]
pub struct StubGeolocation {
    city: String,
    nearby: Option<Vec<String>>,
    calls: Mutex<usize>,
}

impl StubGeolocation {
    /// Resolves every coordinate pair to `city` with the given nearby cities.
    #[must_use]
    pub fn new(city: &str, nearby: Option<Vec<&str>>) -> Self {
        Self {
            city: city.to_owned(),
            nearby: nearby.map(|cities| cities.into_iter().map(str::to_owned).collect()),
            calls: Mutex::new(0),
        }
    }

    /// Number of lookups performed so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn record(&self) {
        *self.calls.lock().unwrap() += 1;
    }
}

#[async_trait]
impl GeolocationService for StubGeolocation {
    async fn city_for_coordinates(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<String, DomainError> {
        self.record();
        Ok(self.city.clone())
    }

    async fn nearby_cities_within(
        &self,
        _latitude: f64,
        _longitude: f64,
        _radius_km: f64,
    ) -> Result<Option<Vec<String>>, DomainError> {
        self.record();
        Ok(self.nearby.clone())
    }
}

/// A geolocation service whose provider is always unreachable.
#[derive(Debug)]
pub struct FailingGeolocation;

#[async_trait]
impl GeolocationService for FailingGeolocation {
    async fn city_for_coordinates(
        &self,
        _latitude: f64,
        _longitude: f64,
    ) -> Result<String, DomainError> {
        Err(DomainError::Geolocation("provider unreachable".into()))
    }

    async fn nearby_cities_within(
        &self,
        _latitude: f64,
        _longitude: f64,
        _radius_km: f64,
    ) -> Result<Option<Vec<String>>, DomainError> {
        Err(DomainError::Geolocation("provider unreachable".into()))
    }
}
