//! Storage backend configuration.

use lobby_core::enums::StoreBackend;
use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "lobby.db".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Which storage adapter to open.
    #[serde(default)]
    pub backend: StoreBackend,

    /// Local libSQL database file (or `:memory:`).
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote libSQL URL (e.g., `libsql://lobby-org.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Remote libSQL auth token.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl StoreConfig {
    /// Check if a remote libSQL database is configured.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_local_libsql() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackend::Libsql);
        assert_eq!(config.path, "lobby.db");
        assert!(!config.is_remote());
    }

    #[test]
    fn remote_requires_url_and_token() {
        let mut config = StoreConfig {
            url: "libsql://lobby.turso.io".into(),
            ..Default::default()
        };
        assert!(!config.is_remote());
        config.auth_token = "token".into();
        assert!(config.is_remote());
    }
}
