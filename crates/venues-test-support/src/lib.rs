//! Shared test doubles and fixtures for the venue availability engine.

mod clock;
mod fixtures;
mod geolocation;
mod repository;

pub use clock::FixedClock;
pub use fixtures::{rating, reservation, venue};
pub use geolocation::{FailingGeolocation, StubGeolocation};
pub use repository::{FailingStore, InMemoryStore};
