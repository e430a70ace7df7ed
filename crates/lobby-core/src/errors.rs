//! Cross-cutting error types for Lobby.
//!
//! `CoreError` is the taxonomy every data-access operation reports in. Storage,
//! auth and mail crates keep their own error enums and convert into this one at
//! the service boundary.

use thiserror::Error;

use crate::enums::EntityType;

/// Errors surfaced by data-access operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The normalized email is already on the waitlist.
    #[error("Email already exists in waitlist")]
    DuplicateEmail { email: String },

    /// Entity lookup returned no result.
    #[error("{} not found: {id}", .entity.label())]
    NotFound { entity: EntityType, id: String },

    /// The operation requires an authenticated admin session.
    #[error("Unauthorized")]
    Unauthorized,

    /// Input failed validation (empty required field, malformed email).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network or storage failure.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl CoreError {
    pub fn not_found(entity: EntityType, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::BackendUnavailable(message.into())
    }
}
