//! Admin credential and session configuration.

use std::path::PathBuf;

use lobby_core::enums::SessionMode;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AdminConfig {
    /// Plaintext admin secret. Hashed at load; prefer `secret_sha256`.
    #[serde(default)]
    pub secret: String,

    /// Hex-encoded SHA-256 digest of the admin secret.
    #[serde(default)]
    pub secret_sha256: String,

    /// Where the session flag is persisted.
    #[serde(default)]
    pub session_mode: SessionMode,

    /// Directory for the local session flag file. Empty means `~/.lobby`.
    #[serde(default)]
    pub session_dir: String,
}

impl AdminConfig {
    /// Check if a credential has been supplied in either form.
    pub fn is_configured(&self) -> bool {
        !self.secret.is_empty() || !self.secret_sha256.trim().is_empty()
    }

    /// Validate the digest form if present: 64 hex characters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let digest = self.secret_sha256.trim();
        if digest.is_empty() {
            return Ok(());
        }
        if digest.len() != 64 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidValue {
                field: "admin.secret_sha256".into(),
                reason: "expected 64 hex characters".into(),
            });
        }
        Ok(())
    }

    /// Resolve the directory holding the local session flag.
    pub fn resolved_session_dir(&self) -> Option<PathBuf> {
        if self.session_dir.is_empty() {
            dirs::home_dir().map(|h| h.join(".lobby"))
        } else {
            Some(PathBuf::from(&self.session_dir))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = AdminConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.session_mode, SessionMode::Shared);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn configured_with_either_form() {
        let plain = AdminConfig {
            secret: "hunter2".into(),
            ..Default::default()
        };
        assert!(plain.is_configured());

        let digest = AdminConfig {
            secret_sha256: "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7".into(),
            ..Default::default()
        };
        assert!(digest.is_configured());
        assert!(digest.validate().is_ok());
    }

    #[test]
    fn whitespace_digest_is_not_configured() {
        let config = AdminConfig {
            secret_sha256: "   ".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn malformed_digest_is_rejected() {
        let config = AdminConfig {
            secret_sha256: "not-a-digest".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn explicit_session_dir_wins() {
        let config = AdminConfig {
            session_dir: "/tmp/lobby-session".into(),
            ..Default::default()
        };
        assert_eq!(
            config.resolved_session_dir(),
            Some(PathBuf::from("/tmp/lobby-session"))
        );
    }
}
