//! # lobby-db
//!
//! Persistence and data access for Lobby.
//!
//! The [`LobbyStore`] trait is the storage port. Two adapters implement it:
//! [`LibsqlStore`] (relational, local file or remote libSQL server) and
//! [`MemoryStore`] (in-process documents with embedded comments).
//! [`LobbyService`] sits on top and owns validation, timestamps, authorship,
//! existence checks, admin authorization, and the change feed.

pub mod error;
pub mod helpers;
pub mod memory;
pub mod service;
pub mod shared_session;
mod sql;
pub mod store;
pub mod updates;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

pub use error::DatabaseError;
pub use memory::MemoryStore;
pub use service::LobbyService;
pub use service::feed::{ChangeFeed, Subscription};
pub use shared_session::StoreSessionStore;
pub use sql::LibsqlStore;
pub use store::LobbyStore;
pub use updates::update::{UpdatePatch, UpdatePatchBuilder};

use lobby_config::StoreConfig;
use lobby_core::enums::StoreBackend;

/// Open the adapter selected by `config.backend`.
///
/// For libSQL, a configured `url` + `auth_token` pair selects the remote
/// server; otherwise `path` is opened locally.
///
/// # Errors
///
/// Returns `DatabaseError` if the backend cannot be opened.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn LobbyStore>, DatabaseError> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Libsql if config.is_remote() => Ok(Arc::new(
            LibsqlStore::open_remote(&config.url, &config.auth_token).await?,
        )),
        StoreBackend::Libsql => Ok(Arc::new(LibsqlStore::open_local(&config.path).await?)),
    }
}
