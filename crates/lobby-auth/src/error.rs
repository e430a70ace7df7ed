use lobby_core::errors::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid admin password")]
    InvalidCredentials,

    #[error("admin login is disabled: no credential configured")]
    NotConfigured,

    #[error("admin credential is malformed: {0}")]
    MalformedDigest(String),

    #[error("session store error: {0}")]
    SessionStore(String),
}

impl From<AuthError> for CoreError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidCredentials | AuthError::NotConfigured => Self::Unauthorized,
            AuthError::MalformedDigest(msg) | AuthError::SessionStore(msg) => {
                Self::BackendUnavailable(msg)
            }
        }
    }
}
