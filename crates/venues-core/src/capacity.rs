//! Seat availability derived from reservations in a time window.

use crate::model::{Reservation, Venue};

/// Total guests across `reservations`, summed wide so that any set of valid
/// rows fits.
#[must_use]
pub fn reserved_guests(reservations: &[Reservation]) -> i64 {
    reservations
        .iter()
        .map(|r| i64::from(r.number_of_guests))
        .sum()
}

/// Seats still free at `venue` given the reservations that fall inside the
/// window of interest.
///
/// The result is not clamped at zero: a negative value means the venue is
/// over-booked, for example after its maximum capacity was lowered. It
/// saturates at `i32::MIN` when the deficit does not fit.
#[must_use]
pub fn available_capacity(venue: &Venue, reservations_in_window: &[Reservation]) -> i32 {
    if reservations_in_window.is_empty() {
        return venue.maximum_capacity;
    }
    let free = i64::from(venue.maximum_capacity) - reserved_guests(reservations_in_window);
    i32::try_from(free).unwrap_or(if free < 0 { i32::MIN } else { i32::MAX })
}
