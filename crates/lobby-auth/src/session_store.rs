//! Session persistence.
//!
//! [`SessionStore`] is the seam between the gate and wherever the session
//! flag lives. Two implementations ship here: [`FileSessionStore`] (a flag
//! file on the local machine) and [`MemorySessionStore`] (process-local, for
//! tests and the in-memory backend). The shared store-backed implementation
//! lives in `lobby-db`.

use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use lobby_core::entities::AdminSession;
use tokio::sync::RwLock;

use crate::error::AuthError;

const SESSION_FILE_NAME: &str = "admin-session.json";

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the current session. An absent record reads as logged out.
    async fn load(&self) -> Result<AdminSession, AuthError>;

    /// Overwrite the session record.
    async fn save(&self, session: &AdminSession) -> Result<(), AuthError>;
}

// ---------------------------------------------------------------------------
// FileSessionStore
// ---------------------------------------------------------------------------

/// Session flag persisted as JSON in `<dir>/admin-session.json`.
///
/// Survives restarts but is not shared between machines. Saving a
/// logged-out session removes the file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE_NAME),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<AdminSession, AuthError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AdminSession::logged_out(Utc::now()));
            }
            Err(e) => {
                return Err(AuthError::SessionStore(format!(
                    "read {}: {e}",
                    self.path.display()
                )));
            }
        };
        match serde_json::from_str(&raw) {
            Ok(session) => Ok(session),
            Err(error) => {
                tracing::warn!(%error, path = %self.path.display(), "corrupt session flag; treating as logged out");
                Ok(AdminSession::logged_out(Utc::now()))
            }
        }
    }

    fn write(&self, session: &AdminSession) -> Result<(), AuthError> {
        if !session.authenticated {
            if self.path.exists() {
                fs::remove_file(&self.path).map_err(|e| {
                    AuthError::SessionStore(format!("failed to delete {}: {e}", self.path.display()))
                })?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AuthError::SessionStore(format!("mkdir {}: {e}", parent.display())))?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }

        let json = serde_json::to_string(session)
            .map_err(|e| AuthError::SessionStore(format!("serialize session: {e}")))?;
        fs::write(&self.path, json)
            .map_err(|e| AuthError::SessionStore(format!("write {}: {e}", self.path.display())))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::SessionStore(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<AdminSession, AuthError> {
        self.read()
    }

    async fn save(&self, session: &AdminSession) -> Result<(), AuthError> {
        self.write(session)
    }
}

// ---------------------------------------------------------------------------
// MemorySessionStore
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RwLock<Option<AdminSession>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<AdminSession, AuthError> {
        Ok(self
            .current
            .read()
            .await
            .clone()
            .unwrap_or_else(|| AdminSession::logged_out(Utc::now())))
    }

    async fn save(&self, session: &AdminSession) -> Result<(), AuthError> {
        *self.current.write().await = Some(session.clone());
        Ok(())
    }
}
