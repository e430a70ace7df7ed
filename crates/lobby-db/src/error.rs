//! Database error types for lobby-db.

use lobby_core::errors::CoreError;
use thiserror::Error;

/// Errors from storage operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// The email is already on the waitlist.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A freshly generated ID is already in use. Retried with a new ID.
    #[error("ID already taken: {0}")]
    IdTaken(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Session gate setup failed.
    #[error(transparent)]
    Auth(#[from] lobby_auth::AuthError),
}

impl From<DatabaseError> for CoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::Conflict(email) => Self::DuplicateEmail { email },
            DatabaseError::Auth(auth) => auth.into(),
            other => {
                tracing::error!(error = %other, "storage operation failed");
                Self::BackendUnavailable(other.to_string())
            }
        }
    }
}
