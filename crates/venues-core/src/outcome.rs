//! Structured result of write flows.

use serde::Serialize;

/// Success or failure of a business operation, with a message for the user.
///
/// Expected, recoverable outcomes (invalid input, no-op updates, store write
/// failures) are reported through this type instead of `DomainError`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationOutcome {
    /// Whether the operation took effect.
    pub success: bool,
    /// Human-readable explanation.
    pub message: String,
}

impl OperationOutcome {
    /// A successful outcome.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}
