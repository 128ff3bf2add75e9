//! `findNearbyPlaceNameJSON` response bodies.

use serde::Deserialize;

use crate::error::GeolocationError;

#[derive(Debug, Deserialize)]
pub(crate) struct NearbyPlacesResponse {
    #[serde(default)]
    geonames: Option<Vec<Place>>,
    #[serde(default)]
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Place {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Status {
    message: String,
    value: i32,
}

impl NearbyPlacesResponse {
    /// Place names in response order with duplicates removed.
    pub(crate) fn into_place_names(self) -> Result<Vec<String>, GeolocationError> {
        if let Some(status) = self.status {
            return Err(GeolocationError::Service {
                code: status.value,
                message: status.message,
            });
        }

        let mut names: Vec<String> = Vec::new();
        for place in self.geonames.unwrap_or_default() {
            if !place.name.is_empty() && !names.contains(&place.name) {
                names.push(place.name);
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> NearbyPlacesResponse {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn test_extracts_place_names() {
        let response = parse(
            r#"{"geonames":[
                {"name":"Zagreb","countryName":"Croatia","distance":"0.41"},
                {"name":"Sesvete","countryName":"Croatia","distance":"12.9"}
            ]}"#,
        );

        assert_eq!(
            response.into_place_names().unwrap(),
            vec!["Zagreb".to_owned(), "Sesvete".to_owned()]
        );
    }

    #[test]
    fn test_drops_duplicate_and_unnamed_places() {
        let response = parse(
            r#"{"geonames":[{"name":"Split"},{"name":""},{"name":"Solin"},{"name":"Split"}]}"#,
        );

        assert_eq!(
            response.into_place_names().unwrap(),
            vec!["Split".to_owned(), "Solin".to_owned()]
        );
    }

    #[test]
    fn test_empty_body_has_no_places() {
        assert!(parse("{}").into_place_names().unwrap().is_empty());
        assert!(parse(r#"{"geonames":[]}"#).into_place_names().unwrap().is_empty());
    }

    #[test]
    fn test_status_becomes_service_error() {
        let response = parse(
            r#"{"status":{"message":"user account not enabled to use the free webservice","value":10}}"#,
        );

        let error = response.into_place_names().unwrap_err();

        assert!(matches!(error, GeolocationError::Service { code: 10, .. }));
    }
}
