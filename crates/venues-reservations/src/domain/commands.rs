//! Commands for the reservations context.

use chrono::{DateTime, Utc};
use uuid::Uuid;
use venues_core::model::{NewReservation, Reservation};

const GUESTS_NOT_POSITIVE: &str = "Number of guests must be positive.";
const DATE_IN_PAST: &str = "Reservation date cannot be in the past.";

/// Command to book seats at a venue.
#[derive(Debug, Clone)]
pub struct CreateReservation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user making the booking.
    pub user_id: i32,
    /// The venue being booked.
    pub venue_id: i32,
    /// Instant the booking is for.
    pub datetime: DateTime<Utc>,
    /// Seats requested.
    pub number_of_guests: i32,
}

impl CreateReservation {
    /// Returns the message for the first invalid field, judged against `now`.
    #[must_use]
    pub fn validation_error(&self, now: DateTime<Utc>) -> Option<&'static str> {
        if self.number_of_guests <= 0 {
            Some(GUESTS_NOT_POSITIVE)
        } else if self.datetime < now {
            Some(DATE_IN_PAST)
        } else {
            None
        }
    }

    /// The insert payload for this booking.
    #[must_use]
    pub fn to_new_reservation(&self) -> NewReservation {
        NewReservation {
            user_id: self.user_id,
            venue_id: self.venue_id,
            datetime: self.datetime,
            number_of_guests: self.number_of_guests,
        }
    }
}

/// Command to move a reservation or change its guest count. `None` leaves
/// the field unchanged.
#[derive(Debug, Clone)]
pub struct UpdateReservation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user owning the reservation.
    pub user_id: i32,
    /// The reserved venue.
    pub venue_id: i32,
    /// The reservation to change.
    pub reservation_id: i32,
    /// New instant.
    pub datetime: Option<DateTime<Utc>>,
    /// New seat count.
    pub number_of_guests: Option<i32>,
}

impl UpdateReservation {
    /// Returns the message for the first problem with the requested
    /// changes, judged against `now`.
    #[must_use]
    pub fn validation_error(&self, now: DateTime<Utc>) -> Option<&'static str> {
        if self.datetime.is_none() && self.number_of_guests.is_none() {
            Some("Update request cannot be empty. Provide at least one field to update.")
        } else if self.number_of_guests.is_some_and(|n| n <= 0) {
            Some(GUESTS_NOT_POSITIVE)
        } else if self.datetime.is_some_and(|at| at < now) {
            Some(DATE_IN_PAST)
        } else {
            None
        }
    }

    /// Returns `true` if `reservation` belongs to this command's user and
    /// venue.
    #[must_use]
    pub fn targets(&self, reservation: &Reservation) -> bool {
        reservation.id == self.reservation_id
            && reservation.user_id == self.user_id
            && reservation.venue_id == self.venue_id
    }

    /// Returns `true` if at least one provided field differs.
    #[must_use]
    pub fn modifies(&self, reservation: &Reservation) -> bool {
        self.datetime.is_some_and(|at| at != reservation.datetime)
            || self
                .number_of_guests
                .is_some_and(|n| n != reservation.number_of_guests)
    }

    /// Returns a copy of `reservation` with every provided field replaced.
    #[must_use]
    pub fn apply_to(&self, reservation: &Reservation) -> Reservation {
        Reservation {
            datetime: self.datetime.unwrap_or(reservation.datetime),
            number_of_guests: self.number_of_guests.unwrap_or(reservation.number_of_guests),
            ..reservation.clone()
        }
    }
}

/// Command to cancel a reservation. The reservation must belong to both the
/// given user and the given venue.
#[derive(Debug, Clone)]
pub struct DeleteReservation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user cancelling the reservation.
    pub user_id: i32,
    /// The reserved venue.
    pub venue_id: i32,
    /// The reservation to cancel.
    pub reservation_id: i32,
}

impl DeleteReservation {
    /// Returns `true` if `reservation` is the one this command targets.
    #[must_use]
    pub fn targets(&self, reservation: &Reservation) -> bool {
        reservation.id == self.reservation_id
            && reservation.user_id == self.user_id
            && reservation.venue_id == self.venue_id
    }
}
