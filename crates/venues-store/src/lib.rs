//! `PostgreSQL` persistence for venues, ratings, reservations, users and
//! venue types.
//!
//! [`PgVenueStore`] implements every repository trait from `venues-core`
//! over a single connection pool. Reads go straight to the pool; each write
//! runs in its own transaction.

mod pg_venue_store;
mod rating_repository;
mod reservation_repository;
mod rows;
pub mod schema;
mod user_repository;
mod venue_repository;
mod venue_type_repository;

pub use pg_venue_store::PgVenueStore;
