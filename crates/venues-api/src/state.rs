//! Shared application state.

use std::sync::Arc;

use venues_core::clock::Clock;
use venues_core::geolocation::GeolocationService;
use venues_core::repository::{
    RatingRepository, ReservationRepository, UserRepository, VenueRepository,
    VenueTypeRepository,
};

/// Application state shared across all request handlers. Holds only
/// stateless collaborators behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Source of "now" for the active time window.
    pub clock: Arc<dyn Clock>,
    /// Venue records.
    pub venues: Arc<dyn VenueRepository>,
    /// Rating records.
    pub ratings: Arc<dyn RatingRepository>,
    /// Reservation records.
    pub reservations: Arc<dyn ReservationRepository>,
    /// User lookups.
    pub users: Arc<dyn UserRepository>,
    /// Venue type taxonomy.
    pub venue_types: Arc<dyn VenueTypeRepository>,
    /// Coordinate to city resolution.
    pub geolocation: Arc<dyn GeolocationService>,
}

impl AppState {
    /// Creates application state over a store implementing every repository.
    #[must_use]
    pub fn new<S>(
        store: Arc<S>,
        clock: Arc<dyn Clock>,
        geolocation: Arc<dyn GeolocationService>,
    ) -> Self
    where
        S: VenueRepository
            + RatingRepository
            + ReservationRepository
            + UserRepository
            + VenueTypeRepository
            + 'static,
    {
        Self {
            clock,
            venues: store.clone(),
            ratings: store.clone(),
            reservations: store.clone(),
            users: store.clone(),
            venue_types: store,
            geolocation,
        }
    }
}
