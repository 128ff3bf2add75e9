//! Row types decoded from query results.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use venues_core::model::{Rating, Reservation, Venue, VenueReservationCount, VenueType};

#[derive(Debug, FromRow)]
pub(crate) struct VenueRow {
    id: i32,
    name: String,
    location: String,
    description: String,
    working_hours: String,
    maximum_capacity: i32,
    venue_type_id: i32,
    average_rating: f64,
}

impl From<VenueRow> for Venue {
    fn from(row: VenueRow) -> Self {
        // Availability is attached by the enrichment pipeline.
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
            description: row.description,
            working_hours: row.working_hours,
            maximum_capacity: row.maximum_capacity,
            available_capacity: row.maximum_capacity,
            venue_type_id: row.venue_type_id,
            average_rating: row.average_rating,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct RatingRow {
    id: i32,
    venue_id: i32,
    rating: f64,
    username: String,
    comment: Option<String>,
}

impl From<RatingRow> for Rating {
    fn from(row: RatingRow) -> Self {
        Self {
            id: row.id,
            venue_id: row.venue_id,
            rating: row.rating,
            username: row.username,
            comment: row.comment,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ReservationRow {
    id: i32,
    user_id: i32,
    venue_id: i32,
    datetime: DateTime<Utc>,
    number_of_guests: i32,
}

impl From<ReservationRow> for Reservation {
    fn from(row: ReservationRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            venue_id: row.venue_id,
            datetime: row.datetime,
            number_of_guests: row.number_of_guests,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct VenueTypeRow {
    id: i32,
    name: String,
}

impl From<VenueTypeRow> for VenueType {
    fn from(row: VenueTypeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
        }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ReservationCountRow {
    venue_id: i32,
    reservation_count: i64,
}

impl From<ReservationCountRow> for VenueReservationCount {
    fn from(row: ReservationCountRow) -> Self {
        Self {
            venue_id: row.venue_id,
            reservation_count: row.reservation_count,
        }
    }
}
