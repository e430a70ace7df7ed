//! Shared request state.

use std::sync::Arc;

use lobby_core::events::ServerEvent;
use lobby_db::{LobbyService, Subscription};
use lobby_mail::Mailer;
use tokio::sync::broadcast;

const HUB_CAPACITY: usize = 128;

/// Cloned into every handler. The hub fans server events out to every
/// connected socket.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LobbyService>,
    pub mailer: Arc<dyn Mailer>,
    pub hub: broadcast::Sender<ServerEvent>,
    _feeds: Arc<[Subscription; 2]>,
}

impl AppState {
    /// Wire the service change feed into the hub. Must be called inside a
    /// tokio runtime.
    pub fn new(service: Arc<LobbyService>, mailer: Arc<dyn Mailer>) -> Self {
        let (hub, _) = broadcast::channel(HUB_CAPACITY);

        let waitlist_hub = hub.clone();
        let waitlist = service.subscribe_to_waitlist(move |entries| {
            let _ = waitlist_hub.send(ServerEvent::WaitlistUpdated(entries));
        });
        let updates_hub = hub.clone();
        let updates = service.subscribe_to_updates(move |updates| {
            let _ = updates_hub.send(ServerEvent::UpdatesUpdated(updates));
        });

        Self {
            service,
            mailer,
            hub,
            _feeds: Arc::new([waitlist, updates]),
        }
    }

    /// Send to every connected client. Dropped when nobody is listening.
    pub fn broadcast(&self, event: ServerEvent) {
        let _ = self.hub.send(event);
    }
}
