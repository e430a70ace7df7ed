//! HTTP error mapping.
//!
//! Every failure leaves the server as `{ "message": string }` with the status
//! its [`CoreError`] kind maps to. Backend details are logged, never returned.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lobby_core::errors::CoreError;
use serde::Serialize;
use thiserror::Error;

pub const SERVER_ERROR_MESSAGE: &str = "Server error";
pub const INVALID_PASSWORD_MESSAGE: &str = "Invalid password";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{INVALID_PASSWORD_MESSAGE}")]
    InvalidPassword,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedPayload(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

/// Client-facing text for a domain error.
#[must_use]
pub fn public_message(error: &CoreError) -> String {
    match error {
        CoreError::NotFound { entity, .. } => format!("{} not found", entity.label()),
        CoreError::Validation(msg) => msg.clone(),
        CoreError::BackendUnavailable(_) => SERVER_ERROR_MESSAGE.to_string(),
        CoreError::DuplicateEmail { .. } | CoreError::Unauthorized => error.to_string(),
    }
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Core(CoreError::DuplicateEmail { .. } | CoreError::Validation(_))
            | Self::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            Self::Core(CoreError::Unauthorized) | Self::InvalidPassword => StatusCode::UNAUTHORIZED,
            Self::Core(CoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Core(CoreError::BackendUnavailable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Core(core) => public_message(core),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { message: self.message() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobby_core::enums::EntityType;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (
                ApiError::from(CoreError::DuplicateEmail {
                    email: "a@test.com".into(),
                }),
                StatusCode::BAD_REQUEST,
                "Email already exists in waitlist",
            ),
            (
                ApiError::from(CoreError::validation("title is required")),
                StatusCode::BAD_REQUEST,
                "title is required",
            ),
            (
                ApiError::from(CoreError::Unauthorized),
                StatusCode::UNAUTHORIZED,
                "Unauthorized",
            ),
            (
                ApiError::from(CoreError::not_found(EntityType::Update, "upd-1")),
                StatusCode::NOT_FOUND,
                "Update not found",
            ),
            (
                ApiError::from(CoreError::backend("disk on fire")),
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server error",
            ),
            (
                ApiError::InvalidPassword,
                StatusCode::UNAUTHORIZED,
                "Invalid password",
            ),
        ];
        for (error, status, message) in cases {
            assert_eq!(error.status(), status);
            assert_eq!(error.message(), message);
        }
    }
}
