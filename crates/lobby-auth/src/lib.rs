//! # lobby-auth
//!
//! Admin authentication for Lobby.
//!
//! Holds the configured admin secret as a SHA-256 digest, verifies submitted
//! passwords in constant time, and persists the resulting session through a
//! pluggable [`SessionStore`].

pub mod credential;
pub mod error;
pub mod gate;
pub mod session_store;

use std::path::PathBuf;

pub use credential::{AdminCredential, hash_secret_hex};
pub use error::AuthError;
pub use gate::AdminGate;
pub use session_store::{FileSessionStore, MemorySessionStore, SessionStore};

use lobby_config::AdminConfig;

/// Build the local flag-file session store from config.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if no session directory can be resolved.
pub fn local_session_store(config: &AdminConfig) -> Result<FileSessionStore, AuthError> {
    let dir: PathBuf = config.resolved_session_dir().ok_or_else(|| {
        AuthError::SessionStore("home directory not found; set admin.session_dir".into())
    })?;
    Ok(FileSessionStore::new(dir))
}
