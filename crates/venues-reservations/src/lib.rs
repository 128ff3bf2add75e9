//! Venues: user reservation bounded context.
//!
//! Books, moves, lists and cancels reservations on a user's behalf. A
//! booking is accepted only while the venue has enough free seats in the
//! half-hour window the booking falls in.

pub mod application;
pub mod domain;
