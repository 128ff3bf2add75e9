//! Query parameters for the venue listings.

use venues_core::page::PageRequest;

/// Parameters of the general venue listing.
#[derive(Debug, Clone, Default)]
pub struct ListVenues {
    /// Requested page.
    pub page: PageRequest,
    /// Case-insensitive match on name or description.
    pub search: Option<String>,
    /// Venue types to include.
    pub type_ids: Option<Vec<i32>>,
}

impl ListVenues {
    /// The search text, or `None` when absent or blank.
    #[must_use]
    pub fn search_query(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|query| !query.is_empty())
    }

    /// The type filter, or `None` when absent or empty.
    #[must_use]
    pub fn type_filter(&self) -> Option<&[i32]> {
        self.type_ids.as_deref().filter(|ids| !ids.is_empty())
    }
}

/// Parameters of the nearby venue listing. Both coordinates are needed for a
/// location-aware search.
#[derive(Debug, Clone, Copy, Default)]
pub struct FindNearbyVenues {
    /// Requested page.
    pub page: PageRequest,
    /// Caller latitude in degrees.
    pub latitude: Option<f64>,
    /// Caller longitude in degrees.
    pub longitude: Option<f64>,
}
