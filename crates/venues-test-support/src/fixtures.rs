//! Record builders with sensible defaults.

use chrono::{DateTime, Utc};
use venues_core::model::{Rating, Reservation, Venue};

/// A venue with no ratings and every seat free.
#[must_use]
pub fn venue(id: i32, name: &str, location: &str, maximum_capacity: i32) -> Venue {
    Venue {
        id,
        name: name.to_owned(),
        location: location.to_owned(),
        description: format!("{name} description"),
        working_hours: "08:00-23:00".to_owned(),
        maximum_capacity,
        available_capacity: maximum_capacity,
        venue_type_id: 1,
        average_rating: 0.0,
    }
}

/// A rating left by "tester" without a comment.
#[must_use]
pub fn rating(id: i32, venue_id: i32, value: f64) -> Rating {
    Rating {
        id,
        venue_id,
        rating: value,
        username: "tester".to_owned(),
        comment: None,
    }
}

/// A reservation owned by user 1.
#[must_use]
pub fn reservation(
    id: i32,
    venue_id: i32,
    datetime: DateTime<Utc>,
    number_of_guests: i32,
) -> Reservation {
    Reservation {
        id,
        user_id: 1,
        venue_id,
        datetime,
        number_of_guests,
    }
}
