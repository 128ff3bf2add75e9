//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
///
/// Business-rule violations are not errors; they travel as
/// [`OperationOutcome`](crate::outcome::OperationOutcome) failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A venue, user, reservation or venue type was not found.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: &'static str,
        /// The identifier that had no match.
        id: i32,
    },

    /// Malformed input that never reaches domain logic (paging, filters).
    #[error("validation error: {0}")]
    Validation(String),

    /// The external geolocation lookup failed.
    #[error("geolocation lookup failed: {0}")]
    Geolocation(String),

    /// An infrastructure/persistence error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for a missing venue.
    #[must_use]
    pub fn venue_not_found(id: i32) -> Self {
        Self::NotFound { entity: "Venue", id }
    }

    /// Shorthand for a missing user.
    #[must_use]
    pub fn user_not_found(id: i32) -> Self {
        Self::NotFound { entity: "User", id }
    }

    /// Shorthand for a missing reservation.
    #[must_use]
    pub fn reservation_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Reservation",
            id,
        }
    }

    /// Shorthand for a missing venue type.
    #[must_use]
    pub fn venue_type_not_found(id: i32) -> Self {
        Self::NotFound {
            entity: "Venue type",
            id,
        }
    }
}
