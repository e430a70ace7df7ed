//! # lobby-mail
//!
//! Outbound email for Lobby: a welcome mail on waitlist join and an
//! announcement to every waitlist member when an update is posted, sent
//! through the EmailJS REST API.
//!
//! Callers treat every send as fire-and-forget. Failures are logged and
//! never fail the operation that triggered them.

mod error;
mod http;
pub mod mailer;
pub mod notify;
pub mod templates;

use std::sync::Arc;

pub use error::MailError;
pub use mailer::{Delivery, EmailJsMailer, Mailer, NoopMailer};
pub use notify::{NotifySummary, notify_waitlist};

use lobby_config::LobbyConfig;

/// Pick the mailer for `config`: EmailJS when credentials are present,
/// otherwise a no-op.
///
/// # Errors
///
/// Returns `MailError::Http` if the HTTP client cannot be built.
pub fn mailer_from_config(config: &LobbyConfig) -> Result<Arc<dyn Mailer>, MailError> {
    if config.email.is_configured() {
        let mailer = EmailJsMailer::new(config.email.clone(), config.server.public_url.clone())?;
        Ok(Arc::new(mailer))
    } else {
        tracing::debug!("email not configured; outbound mail disabled");
        Ok(Arc::new(NoopMailer))
    }
}
