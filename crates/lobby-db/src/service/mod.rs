//! Data-access layer.
//!
//! `LobbyService` wraps a [`LobbyStore`] (persistence), an [`AdminGate`]
//! (write authorization), and a [`ChangeFeed`] (realtime snapshots). The
//! domain operations are implemented as `impl LobbyService` blocks in the
//! sibling modules.
//!
//! Every admin operation re-reads the session before touching the store, so
//! a logout anywhere takes effect on the next call. All failures surface as
//! [`CoreError`].

mod admin;
mod comments;
pub mod feed;
mod updates;
mod waitlist;

use std::sync::Arc;

use lobby_auth::{AdminCredential, AdminGate, SessionStore, local_session_store};
use lobby_config::LobbyConfig;
use lobby_core::enums::{Collection, SessionMode};
use lobby_core::errors::CoreError;

use crate::error::DatabaseError;
use crate::open_store;
use crate::shared_session::StoreSessionStore;
use crate::store::LobbyStore;
use feed::ChangeFeed;

/// Draws per insert before an ID clash is reported as a backend failure.
const ID_ATTEMPTS: u32 = 3;

pub struct LobbyService {
    store: Arc<dyn LobbyStore>,
    gate: Arc<AdminGate>,
    feed: ChangeFeed,
}

impl LobbyService {
    pub fn new(store: Arc<dyn LobbyStore>, gate: Arc<AdminGate>) -> Self {
        Self {
            store,
            gate,
            feed: ChangeFeed::new(),
        }
    }

    /// Open the configured store and session gate.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be opened, or
    /// `DatabaseError::Auth` if the credential or session directory is invalid.
    pub async fn from_config(config: &LobbyConfig) -> Result<Self, DatabaseError> {
        let store = open_store(&config.store).await?;
        let credential = AdminCredential::from_config(&config.admin)?;
        if credential.is_none() {
            tracing::warn!("no admin secret configured; admin login is disabled");
        }
        let sessions: Arc<dyn SessionStore> = match config.admin.session_mode {
            SessionMode::Shared => Arc::new(StoreSessionStore::new(Arc::clone(&store))),
            SessionMode::Local => Arc::new(local_session_store(&config.admin)?),
        };
        tracing::info!(
            backend = store.backend_name(),
            session_mode = %config.admin.session_mode,
            "lobby service ready"
        );
        Ok(Self::new(store, Arc::new(AdminGate::new(credential, sessions))))
    }

    /// Access the underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn LobbyStore> {
        &self.store
    }

    #[must_use]
    pub const fn gate(&self) -> &Arc<AdminGate> {
        &self.gate
    }

    #[must_use]
    pub const fn feed(&self) -> &ChangeFeed {
        &self.feed
    }

    /// Fail with `Unauthorized` unless the session is currently authenticated.
    async fn require_admin(&self) -> Result<(), CoreError> {
        if self.gate.is_authenticated().await? {
            Ok(())
        } else {
            Err(CoreError::Unauthorized)
        }
    }

    fn changed(&self, collection: Collection) {
        self.feed.publish(collection);
    }
}

/// Decide whether an insert that failed on its `attempt`-th ID draw gets
/// another fresh ID. Any other failure is returned as is.
fn retry_with_fresh_id(error: DatabaseError, attempt: u32) -> Result<(), CoreError> {
    match error {
        DatabaseError::IdTaken(id) if attempt < ID_ATTEMPTS => {
            tracing::warn!(%id, attempt, "generated id already taken; drawing another");
            Ok(())
        }
        other => Err(other.into()),
    }
}

impl std::fmt::Debug for LobbyService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LobbyService")
            .field("backend", &self.store.backend_name())
            .field("gate", &self.gate)
            .finish_non_exhaustive()
    }
}
