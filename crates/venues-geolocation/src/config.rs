//! Client configuration.

use std::time::Duration;

/// Connection settings for the GeoNames service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoNamesConfig {
    /// Service root, e.g. `http://api.geonames.org`.
    pub base_url: String,
    /// Registered GeoNames account name.
    pub username: String,
    /// Upper bound on places returned by the nearby lookup.
    pub max_rows: u32,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for GeoNamesConfig {
    fn default() -> Self {
        Self {
            base_url: "http://api.geonames.org".to_owned(),
            username: "demo".to_owned(),
            max_rows: 20,
            timeout: Duration::from_secs(10),
        }
    }
}
