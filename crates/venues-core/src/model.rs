//! Plain data records shared by every bounded context.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A bookable venue.
///
/// `available_capacity` and `average_rating` are derived on read; the stored
/// average is a denormalized copy refreshed on every rating submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Venue {
    /// Venue identifier.
    pub id: i32,
    /// Display name.
    pub name: String,
    /// City the venue is located in.
    pub location: String,
    /// Free-form description.
    pub description: String,
    /// Human-readable opening hours.
    pub working_hours: String,
    /// Seats the venue can hold. Always positive.
    pub maximum_capacity: i32,
    /// Seats not taken by reservations in the active window. Negative when
    /// the venue is over-booked.
    pub available_capacity: i32,
    /// Reference into the venue type taxonomy.
    pub venue_type_id: i32,
    /// Mean of all ratings, or `0.0` without ratings.
    pub average_rating: f64,
}

/// Insert payload for a venue.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVenue {
    /// Display name.
    pub name: String,
    /// City the venue is located in.
    pub location: String,
    /// Free-form description.
    pub description: String,
    /// Human-readable opening hours.
    pub working_hours: String,
    /// Seats the venue can hold.
    pub maximum_capacity: i32,
    /// Reference into the venue type taxonomy.
    pub venue_type_id: i32,
    /// Initial stored average.
    pub average_rating: f64,
}

/// A single rating submission. Ratings are never edited.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    /// Rating identifier.
    pub id: i32,
    /// Rated venue.
    pub venue_id: i32,
    /// Value in `[0.5, 5.0]`.
    pub rating: f64,
    /// Name of the submitting user.
    pub username: String,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// Insert payload for a rating.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRating {
    /// Rated venue.
    pub venue_id: i32,
    /// Value in `[0.5, 5.0]`.
    pub rating: f64,
    /// Name of the submitting user.
    pub username: String,
    /// Optional free-text comment.
    pub comment: Option<String>,
}

/// A reservation of seats at a venue for a point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    /// Reservation identifier.
    pub id: i32,
    /// Owning user.
    pub user_id: i32,
    /// Reserved venue.
    pub venue_id: i32,
    /// Instant the reservation is for.
    pub datetime: DateTime<Utc>,
    /// Seats taken. Always positive.
    pub number_of_guests: i32,
}

/// Insert payload for a reservation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    /// Owning user.
    pub user_id: i32,
    /// Reserved venue.
    pub venue_id: i32,
    /// Instant the reservation is for.
    pub datetime: DateTime<Utc>,
    /// Seats taken.
    pub number_of_guests: i32,
}

/// An entry of the venue type taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueType {
    /// Type identifier.
    pub id: i32,
    /// Type name, e.g. "Bar".
    pub name: String,
}

/// Popularity row: a venue and how many reservations it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VenueReservationCount {
    /// Ranked venue.
    pub venue_id: i32,
    /// Number of reservations for the venue.
    pub reservation_count: i64,
}
