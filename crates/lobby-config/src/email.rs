//! Outbound email (EmailJS) configuration.

use serde::{Deserialize, Serialize};

fn default_api_url() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".into()
}

fn default_from_name() -> String {
    "The Lobby Team".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// EmailJS send endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// EmailJS service identifier.
    #[serde(default)]
    pub service_id: String,

    /// EmailJS public key (sent as `user_id`).
    #[serde(default)]
    pub public_key: String,

    /// EmailJS private key, required for server-side sends in strict mode.
    #[serde(default)]
    pub access_token: String,

    /// Template used for the welcome email after joining the waitlist.
    #[serde(default)]
    pub welcome_template_id: String,

    /// Template used to announce a new update to the waitlist.
    #[serde(default)]
    pub update_template_id: String,

    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            service_id: String::new(),
            public_key: String::new(),
            access_token: String::new(),
            welcome_template_id: String::new(),
            update_template_id: String::new(),
            from_name: default_from_name(),
        }
    }
}

impl EmailConfig {
    /// Check if the service credentials are present.
    pub fn is_configured(&self) -> bool {
        !self.service_id.is_empty() && !self.public_key.is_empty()
    }

    pub fn sends_welcome(&self) -> bool {
        self.is_configured() && !self.welcome_template_id.is_empty()
    }

    pub fn sends_update_notifications(&self) -> bool {
        self.is_configured() && !self.update_template_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = EmailConfig::default();
        assert!(!config.is_configured());
        assert!(!config.sends_welcome());
        assert!(config.api_url.starts_with("https://api.emailjs.com/"));
    }

    #[test]
    fn templates_gate_each_kind_of_mail() {
        let config = EmailConfig {
            service_id: "service_x".into(),
            public_key: "pk".into(),
            welcome_template_id: "template_welcome".into(),
            ..Default::default()
        };
        assert!(config.sends_welcome());
        assert!(!config.sends_update_notifications());
    }
}
