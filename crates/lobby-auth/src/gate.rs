//! The admin session gate.
//!
//! ```text
//! logged_out ──login(ok)──▶ logged_in
//! logged_in  ──logout────▶ logged_out
//! ```
//!
//! A failed login leaves the stored session untouched.

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use lobby_core::entities::AdminSession;

use crate::credential::AdminCredential;
use crate::error::AuthError;
use crate::session_store::SessionStore;

pub struct AdminGate {
    credential: Option<AdminCredential>,
    sessions: Arc<dyn SessionStore>,
}

impl AdminGate {
    pub fn new(credential: Option<AdminCredential>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            credential,
            sessions,
        }
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.credential.is_some()
    }

    /// Verify `password` and mark the session authenticated.
    ///
    /// # Errors
    ///
    /// `NotConfigured` when no credential is set, `InvalidCredentials` on
    /// mismatch, `SessionStore` if the flag cannot be written.
    pub async fn login(&self, password: &str) -> Result<AdminSession, AuthError> {
        let Some(credential) = &self.credential else {
            tracing::warn!("admin login attempted with no credential configured");
            return Err(AuthError::NotConfigured);
        };
        if !credential.verify(password) {
            tracing::info!("admin login rejected");
            return Err(AuthError::InvalidCredentials);
        }
        let session = AdminSession::logged_in(stamp());
        self.sessions.save(&session).await?;
        tracing::info!("admin logged in");
        Ok(session)
    }

    /// Clear the session. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `SessionStore` if the flag cannot be cleared.
    pub async fn logout(&self) -> Result<AdminSession, AuthError> {
        let session = AdminSession::logged_out(stamp());
        self.sessions.save(&session).await?;
        tracing::info!("admin logged out");
        Ok(session)
    }

    /// Current session record, re-read from the store.
    ///
    /// # Errors
    ///
    /// Returns `SessionStore` if the flag cannot be read.
    pub async fn session(&self) -> Result<AdminSession, AuthError> {
        self.sessions.load().await
    }

    /// # Errors
    ///
    /// Returns `SessionStore` if the flag cannot be read.
    pub async fn is_authenticated(&self) -> Result<bool, AuthError> {
        Ok(self.session().await?.authenticated)
    }
}

/// Microsecond precision, the finest a stored timestamp keeps.
fn stamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

impl std::fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminGate")
            .field("configured", &self.is_configured())
            .finish_non_exhaustive()
    }
}
