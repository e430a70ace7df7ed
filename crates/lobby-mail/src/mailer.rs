//! The [`Mailer`] seam and its EmailJS and no-op implementations.

use std::time::Duration;

use async_trait::async_trait;
use lobby_config::EmailConfig;
use lobby_core::entities::Update;
use serde::Serialize;

use crate::error::MailError;
use crate::http::check_response;
use crate::templates::{UpdateNotificationParams, WelcomeParams};

/// Outcome of a send attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No template configured for this kind of mail.
    Skipped,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Welcome mail after a waitlist join.
    async fn send_welcome(&self, email: &str) -> Result<Delivery, MailError>;

    /// Announcement of a newly posted update to one waitlist member.
    async fn send_update_notification(
        &self,
        email: &str,
        update: &Update,
    ) -> Result<Delivery, MailError>;
}

// ---------------------------------------------------------------------------
// EmailJsMailer
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SendRequest<'a, P: Serialize> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none")]
    access_token: Option<&'a str>,
    template_params: &'a P,
}

/// Sends through the EmailJS REST endpoint.
pub struct EmailJsMailer {
    http: reqwest::Client,
    config: EmailConfig,
    site_url: String,
}

impl EmailJsMailer {
    /// Build a client for `config`. `site_url` is linked from every mail.
    ///
    /// # Errors
    ///
    /// Returns `MailError::Http` if the underlying `reqwest::Client` fails to build.
    pub fn new(config: EmailConfig, site_url: impl Into<String>) -> Result<Self, MailError> {
        let http = reqwest::Client::builder()
            .user_agent("lobby/0.1")
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            http,
            config,
            site_url: site_url.into(),
        })
    }

    async fn send<P: Serialize + Sync>(&self, template_id: &str, params: &P) -> Result<(), MailError> {
        let body = SendRequest {
            service_id: &self.config.service_id,
            template_id,
            user_id: &self.config.public_key,
            access_token: Some(self.config.access_token.as_str()).filter(|t| !t.is_empty()),
            template_params: params,
        };
        let resp = self
            .http
            .post(&self.config.api_url)
            .json(&body)
            .send()
            .await?;
        check_response(resp).await?;
        Ok(())
    }
}

#[async_trait]
impl Mailer for EmailJsMailer {
    async fn send_welcome(&self, email: &str) -> Result<Delivery, MailError> {
        if !self.config.sends_welcome() {
            return Ok(Delivery::Skipped);
        }
        let params = WelcomeParams::new(email, &self.config.from_name, &self.site_url);
        self.send(&self.config.welcome_template_id, &params).await?;
        tracing::debug!(to = email, "welcome email sent");
        Ok(Delivery::Sent)
    }

    async fn send_update_notification(
        &self,
        email: &str,
        update: &Update,
    ) -> Result<Delivery, MailError> {
        if !self.config.sends_update_notifications() {
            return Ok(Delivery::Skipped);
        }
        let params =
            UpdateNotificationParams::new(email, update, &self.config.from_name, &self.site_url);
        self.send(&self.config.update_template_id, &params).await?;
        tracing::debug!(to = email, update_id = %update.id, "update notification sent");
        Ok(Delivery::Sent)
    }
}

// ---------------------------------------------------------------------------
// NoopMailer
// ---------------------------------------------------------------------------

/// Used when no mail service is configured. Every send is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send_welcome(&self, _email: &str) -> Result<Delivery, MailError> {
        Ok(Delivery::Skipped)
    }

    async fn send_update_notification(
        &self,
        _email: &str,
        _update: &Update,
    ) -> Result<Delivery, MailError> {
        Ok(Delivery::Skipped)
    }
}
