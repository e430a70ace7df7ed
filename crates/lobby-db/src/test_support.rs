//! Shared test utilities for lobby-db unit tests.

use std::sync::Arc;

use lobby_auth::{AdminCredential, AdminGate, MemorySessionStore};
use lobby_core::enums::StoreBackend;

use crate::memory::MemoryStore;
use crate::service::LobbyService;
use crate::shared_session::StoreSessionStore;
use crate::sql::LibsqlStore;
use crate::store::LobbyStore;

pub const ADMIN_SECRET: &str = "hunter2";

pub async fn open(backend: StoreBackend) -> Arc<dyn LobbyStore> {
    match backend {
        StoreBackend::Libsql => Arc::new(LibsqlStore::open_local(":memory:").await.unwrap()),
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    }
}

/// Service over `backend` with the session shared through the store.
pub async fn test_service(backend: StoreBackend) -> LobbyService {
    let store = open(backend).await;
    let sessions = Arc::new(StoreSessionStore::new(Arc::clone(&store)));
    let gate = AdminGate::new(Some(AdminCredential::from_secret(ADMIN_SECRET)), sessions);
    LobbyService::new(store, Arc::new(gate))
}

/// Service with an authenticated admin session.
pub async fn admin_service(backend: StoreBackend) -> LobbyService {
    let service = test_service(backend).await;
    service.login(ADMIN_SECRET).await.unwrap();
    service
}

/// Memory store with a process-local session, for gate-only tests.
pub fn memory_service() -> LobbyService {
    let gate = AdminGate::new(
        Some(AdminCredential::from_secret(ADMIN_SECRET)),
        Arc::new(MemorySessionStore::new()),
    );
    LobbyService::new(Arc::new(MemoryStore::new()), Arc::new(gate))
}
