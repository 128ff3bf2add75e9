//! Venues: discovery, availability and rating bounded context.
//!
//! Responsible for listing and searching venues, attaching current available
//! capacity and average rating to every venue returned, resolving a caller's
//! search area from coordinates, and the venue lifecycle including rating
//! submission.

pub mod application;
pub mod domain;
