//! Venues Core: shared domain abstractions.
//!
//! This crate defines the data model, the time window, paging types and the
//! collaborator traits that every bounded context depends on. It contains no
//! infrastructure code.

pub mod capacity;
pub mod clock;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod outcome;
pub mod page;
pub mod repository;
pub mod time_window;
