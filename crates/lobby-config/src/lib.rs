//! # lobby-config
//!
//! Layered configuration loading for Lobby using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LOBBY_*` prefix, `__` as separator)
//! 2. Project-level `.lobby/config.toml`
//! 3. User-level `~/.config/lobby/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LOBBY_ADMIN__SECRET` -> `admin.secret`,
//! `LOBBY_STORE__BACKEND` -> `store.backend`, `LOBBY_EMAIL__SERVICE_ID` ->
//! `email.service_id`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lobby_config::LobbyConfig;
//!
//! let config = LobbyConfig::load_with_dotenv().expect("config");
//!
//! if !config.admin.is_configured() {
//!     eprintln!("admin login is disabled until LOBBY_ADMIN__SECRET is set");
//! }
//! ```

mod admin;
mod email;
mod error;
mod server;
mod store;

pub use admin::AdminConfig;
pub use email::EmailConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use store::StoreConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LobbyConfig {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub email: EmailConfig,
}

impl LobbyConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need `.env`
    /// file loading.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// Loads `.env` from the current directory (if any) before building the
    /// figment. This is the typical entry point for the CLI.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.admin.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".lobby/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("LOBBY_").split("__"))
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lobby").join("config.toml"))
    }
}
