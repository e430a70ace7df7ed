//! Shared session mode: the session flag lives in the store, so every admin
//! client reads and overwrites the same record.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use lobby_auth::{AuthError, SessionStore};
use lobby_core::entities::AdminSession;

use crate::store::LobbyStore;

pub struct StoreSessionStore {
    store: Arc<dyn LobbyStore>,
}

impl StoreSessionStore {
    pub fn new(store: Arc<dyn LobbyStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SessionStore for StoreSessionStore {
    async fn load(&self) -> Result<AdminSession, AuthError> {
        let session = self
            .store
            .load_admin_session()
            .await
            .map_err(|e| AuthError::SessionStore(e.to_string()))?;
        Ok(session.unwrap_or_else(|| AdminSession::logged_out(Utc::now())))
    }

    async fn save(&self, session: &AdminSession) -> Result<(), AuthError> {
        self.store
            .save_admin_session(session)
            .await
            .map_err(|e| AuthError::SessionStore(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn empty_store_reads_logged_out() {
        let sessions = StoreSessionStore::new(Arc::new(MemoryStore::new()));
        assert!(!sessions.load().await.unwrap().authenticated);
    }

    #[tokio::test]
    async fn two_handles_share_one_record() {
        let store: Arc<dyn LobbyStore> = Arc::new(MemoryStore::new());
        let a = StoreSessionStore::new(Arc::clone(&store));
        let b = StoreSessionStore::new(store);

        a.save(&AdminSession::logged_in(Utc::now())).await.unwrap();
        assert!(b.load().await.unwrap().authenticated);

        b.save(&AdminSession::logged_out(Utc::now())).await.unwrap();
        assert!(!a.load().await.unwrap().authenticated);
    }
}
