//! Mail error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The mail API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Response body.
        message: String,
    },

    #[error("failed to encode template params: {0}")]
    Encode(#[from] serde_json::Error),
}
