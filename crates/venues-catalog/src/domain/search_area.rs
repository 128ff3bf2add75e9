//! Tiered resolution of the cities a nearby search covers.
//!
//! Degrades from "no location" (default city) to "imprecise location" (the
//! caller's city only) to "full radius search" (caller's city plus every city
//! within [`NEARBY_RADIUS_KM`]).

use venues_core::error::DomainError;
use venues_core::geolocation::GeolocationService;

/// City searched when the caller sends no coordinates.
pub const DEFAULT_CITY: &str = "Zagreb";

/// Radius around the caller's coordinates for the nearby-city lookup.
pub const NEARBY_RADIUS_KM: f64 = 100.0;

/// The resolved set of cities a nearby-venue query filters on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchArea {
    /// No usable coordinates.
    DefaultCity(String),
    /// The caller's city, with nothing known around it.
    SingleCity(String),
    /// The caller's city and its neighbours, without duplicates.
    CitySet(Vec<String>),
}

impl SearchArea {
    /// Composes the area from a resolved city and the optional nearby cities.
    #[must_use]
    pub fn compose(current_city: String, nearby_cities: Option<Vec<String>>) -> Self {
        match nearby_cities {
            Some(nearby) if !nearby.is_empty() => {
                let mut cities: Vec<String> = Vec::with_capacity(nearby.len() + 1);
                for city in nearby.into_iter().chain(std::iter::once(current_city)) {
                    if !cities.contains(&city) {
                        cities.push(city);
                    }
                }
                Self::CitySet(cities)
            }
            _ => Self::SingleCity(current_city),
        }
    }

    /// Every city in the area.
    #[must_use]
    pub fn cities(&self) -> Vec<&str> {
        match self {
            Self::DefaultCity(city) | Self::SingleCity(city) => vec![city.as_str()],
            Self::CitySet(cities) => cities.iter().map(String::as_str).collect(),
        }
    }
}

/// Resolves the search area for optional caller coordinates.
///
/// # Errors
///
/// Returns `DomainError::Geolocation` if either lookup fails.
pub async fn resolve_search_area(
    latitude: Option<f64>,
    longitude: Option<f64>,
    geolocation: &dyn GeolocationService,
) -> Result<SearchArea, DomainError> {
    let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
        return Ok(SearchArea::DefaultCity(DEFAULT_CITY.to_owned()));
    };

    let current_city = geolocation
        .city_for_coordinates(latitude, longitude)
        .await?;
    let nearby_cities = geolocation
        .nearby_cities_within(latitude, longitude, NEARBY_RADIUS_KM)
        .await?;

    Ok(SearchArea::compose(current_city, nearby_cities))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use venues_test_support::{FailingGeolocation, StubGeolocation};

    use super::*;

    #[tokio::test]
    async fn test_missing_coordinates_fall_back_to_default_city() {
        let geolocation = StubGeolocation::new("Split", None);

        let area = resolve_search_area(None, None, &geolocation).await.unwrap();

        assert_eq!(area, SearchArea::DefaultCity("Zagreb".to_owned()));
        assert_eq!(geolocation.calls(), 0);
    }

    #[tokio::test]
    async fn test_single_coordinate_is_treated_as_missing() {
        let geolocation = StubGeolocation::new("Split", None);

        let area = resolve_search_area(Some(43.5), None, &geolocation)
            .await
            .unwrap();

        assert_eq!(area, SearchArea::DefaultCity("Zagreb".to_owned()));
        assert_eq!(geolocation.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_nearby_cities_searches_current_city() {
        let geolocation = StubGeolocation::new("Split", None);

        let area = resolve_search_area(Some(43.5), Some(16.4), &geolocation)
            .await
            .unwrap();

        assert_eq!(area, SearchArea::SingleCity("Split".to_owned()));
        assert_eq!(area.cities(), vec!["Split"]);
    }

    #[tokio::test]
    async fn test_empty_nearby_list_searches_current_city() {
        let geolocation = StubGeolocation::new("Split", Some(vec![]));

        let area = resolve_search_area(Some(43.5), Some(16.4), &geolocation)
            .await
            .unwrap();

        assert_eq!(area, SearchArea::SingleCity("Split".to_owned()));
    }

    #[tokio::test]
    async fn test_nearby_cities_are_joined_with_current_city() {
        let geolocation = StubGeolocation::new("Rijeka", Some(vec!["Opatija", "Krk"]));

        let area = resolve_search_area(Some(45.3), Some(14.4), &geolocation)
            .await
            .unwrap();

        let cities: HashSet<&str> = area.cities().into_iter().collect();
        assert_eq!(cities, HashSet::from(["Rijeka", "Opatija", "Krk"]));
        assert!(matches!(area, SearchArea::CitySet(_)));
        assert_eq!(geolocation.calls(), 2);
    }

    #[test]
    fn test_current_city_is_not_duplicated() {
        let area = SearchArea::compose(
            "Rijeka".to_owned(),
            Some(vec!["Rijeka".to_owned(), "Krk".to_owned(), "Krk".to_owned()]),
        );

        assert_eq!(
            area,
            SearchArea::CitySet(vec!["Rijeka".to_owned(), "Krk".to_owned()])
        );
    }

    #[tokio::test]
    async fn test_lookup_failure_propagates() {
        let result = resolve_search_area(Some(45.3), Some(14.4), &FailingGeolocation).await;

        assert!(matches!(result, Err(DomainError::Geolocation(_))));
    }
}
