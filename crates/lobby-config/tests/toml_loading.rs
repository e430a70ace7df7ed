//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use lobby_config::LobbyConfig;
use lobby_core::enums::{SessionMode, StoreBackend};

#[test]
fn loads_every_section_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[admin]
secret_sha256 = "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7"
session_mode = "local"
session_dir = "/tmp/lobby"

[store]
backend = "memory"
path = "data/lobby.db"

[server]
host = "127.0.0.1"
port = 8080
allowed_origins = ["https://lobby.example.com"]

[email]
service_id = "service_abc"
public_key = "pk_123"
welcome_template_id = "template_welcome"
"#,
        )?;

        let config: LobbyConfig = Figment::from(Serialized::defaults(LobbyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.admin.is_configured());
        assert_eq!(config.admin.session_mode, SessionMode::Local);
        assert_eq!(config.admin.session_dir, "/tmp/lobby");
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.store.path, "data/lobby.db");
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.server.allowed_origins, vec!["https://lobby.example.com"]);
        assert!(config.email.sends_welcome());
        assert!(!config.email.sends_update_notifications());
        Ok(())
    });
}

#[test]
fn partial_section_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
port = 9000
"#,
        )?;

        let config: LobbyConfig = Figment::from(Serialized::defaults(LobbyConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.store.path, "lobby.db");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lobby")?;
        jail.create_file(
            ".lobby/config.toml",
            r#"
[store]
backend = "memory"
"#,
        )?;

        let config = LobbyConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.store.backend, StoreBackend::Memory);
        Ok(())
    });
}

#[test]
fn malformed_digest_fails_load() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lobby")?;
        jail.create_file(
            ".lobby/config.toml",
            r#"
[admin]
secret_sha256 = "abc"
"#,
        )?;

        assert!(LobbyConfig::load().is_err());
        Ok(())
    });
}
