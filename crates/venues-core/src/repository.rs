//! Data-access contracts implemented by the persistence layer.
//!
//! Every method maps to a single query or a single atomic write. Handlers
//! compose them; no method here hides a loop over other methods.

use async_trait::async_trait;

use crate::error::DomainError;
use crate::model::{
    NewRating, NewReservation, NewVenue, Rating, Reservation, Venue, VenueReservationCount,
    VenueType,
};
use crate::page::{Page, PageRequest};
use crate::time_window::TimeWindow;

/// Stored average rating a venue must exceed to be suggested.
pub const SUGGESTION_RATING_THRESHOLD: f64 = 4.0;

/// Venue records.
#[async_trait]
pub trait VenueRepository: Send + Sync {
    /// Loads a single venue.
    async fn find_venue_by_id(&self, id: i32) -> Result<Option<Venue>, DomainError>;

    /// Loads every venue whose id is in `ids`, in no particular order.
    async fn find_venues_by_ids(&self, ids: &[i32]) -> Result<Vec<Venue>, DomainError>;

    /// Pages venues, optionally filtered by a name/description search and by
    /// venue type.
    async fn find_venues_filtered(
        &self,
        page: PageRequest,
        search_query: Option<&str>,
        type_ids: Option<&[i32]>,
    ) -> Result<Page<Venue>, DomainError>;

    /// Pages venues located in `city`.
    async fn find_venues_by_location(
        &self,
        city: &str,
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError>;

    /// Pages venues located in any of `cities`.
    async fn find_venues_by_location_in(
        &self,
        cities: &[String],
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError>;

    /// Pages all venues, newest (highest id) first.
    async fn find_all_venues(&self, page: PageRequest) -> Result<Page<Venue>, DomainError>;

    /// Pages venues rated above the suggestion threshold that still have free
    /// seats in `window`, best rated first, then most free seats.
    async fn find_suggested_venues(
        &self,
        window: TimeWindow,
        page: PageRequest,
    ) -> Result<Page<Venue>, DomainError>;

    /// Inserts a venue and returns its identifier.
    async fn save_venue(&self, venue: NewVenue) -> Result<i32, DomainError>;

    /// Overwrites the editable fields of an existing venue.
    async fn update_venue(&self, venue: &Venue) -> Result<(), DomainError>;

    /// Overwrites the stored average rating of a venue.
    async fn update_venue_rating(
        &self,
        venue_id: i32,
        average_rating: f64,
    ) -> Result<(), DomainError>;

    /// Deletes a venue.
    async fn delete_venue_by_id(&self, id: i32) -> Result<(), DomainError>;
}

/// Rating records.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    /// Loads all ratings of one venue.
    async fn find_ratings_by_venue_id(&self, venue_id: i32) -> Result<Vec<Rating>, DomainError>;

    /// Loads all ratings of every venue in `venue_ids` in one query.
    async fn find_ratings_by_venue_ids(
        &self,
        venue_ids: &[i32],
    ) -> Result<Vec<Rating>, DomainError>;

    /// Inserts a rating and returns its identifier.
    async fn save_rating(&self, rating: NewRating) -> Result<i32, DomainError>;
}

/// Reservation records.
#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Loads a single reservation.
    async fn find_reservation_by_id(&self, id: i32)
    -> Result<Option<Reservation>, DomainError>;

    /// Loads every reservation owned by `user_id`, earliest first.
    async fn find_reservations_by_user_id(
        &self,
        user_id: i32,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Loads the reservations of one venue that fall inside `window`.
    async fn find_reservations_by_venue_and_window(
        &self,
        venue_id: i32,
        window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Loads the reservations of all venues that fall inside `window`.
    /// Grouping by venue is left to the caller.
    async fn find_reservations_in_window(
        &self,
        window: TimeWindow,
    ) -> Result<Vec<Reservation>, DomainError>;

    /// Pages venues ranked by their number of reservations, most first.
    async fn find_top_venues_by_reservation_count(
        &self,
        page: PageRequest,
    ) -> Result<Page<VenueReservationCount>, DomainError>;

    /// Inserts a reservation and returns its identifier.
    async fn save_reservation(&self, reservation: NewReservation) -> Result<i32, DomainError>;

    /// Overwrites the time and guest count of an existing reservation.
    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError>;

    /// Deletes a reservation.
    async fn delete_reservation_by_id(&self, id: i32) -> Result<(), DomainError>;
}

/// User lookups needed by the venue flows.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Returns the username of a user.
    async fn find_username_by_id(&self, user_id: i32) -> Result<Option<String>, DomainError>;
}

/// The venue type taxonomy.
#[async_trait]
pub trait VenueTypeRepository: Send + Sync {
    /// Loads a single venue type.
    async fn find_venue_type_by_id(&self, id: i32) -> Result<Option<VenueType>, DomainError>;

    /// Loads every venue type.
    async fn find_all_venue_types(&self) -> Result<Vec<VenueType>, DomainError>;
}
