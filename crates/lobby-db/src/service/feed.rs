//! Change feed and snapshot subscriptions.
//!
//! Every successful mutation publishes the touched [`Collection`] on a
//! broadcast channel. A subscription task turns each notification into a
//! fresh snapshot read and hands it to the callback. A subscriber that falls
//! behind skips straight to the latest snapshot.

use std::future::Future;
use std::sync::Arc;

use lobby_core::enums::Collection;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use crate::error::DatabaseError;
use crate::store::LobbyStore;

const FEED_CAPACITY: usize = 64;

#[derive(Debug, Clone)]
pub struct ChangeFeed {
    tx: broadcast::Sender<Collection>,
}

impl ChangeFeed {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(FEED_CAPACITY);
        Self { tx }
    }

    /// Notify subscribers. A feed with no subscribers drops the event.
    pub fn publish(&self, collection: Collection) {
        let _ = self.tx.send(collection);
    }

    #[must_use]
    pub fn receiver(&self) -> broadcast::Receiver<Collection> {
        self.tx.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running subscription. Dropping it also unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    handle: JoinHandle<()>,
}

impl Subscription {
    /// Stop delivering snapshots.
    pub fn unsubscribe(self) {
        self.handle.abort();
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Spawn a task that delivers an initial snapshot, then one per change to `topic`.
pub(crate) fn spawn_snapshots<T, Fetch, Fut, Callback>(
    store: Arc<dyn LobbyStore>,
    mut rx: broadcast::Receiver<Collection>,
    topic: Collection,
    fetch: Fetch,
    callback: Callback,
) -> Subscription
where
    T: Send + 'static,
    Fetch: Fn(Arc<dyn LobbyStore>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<T, DatabaseError>> + Send,
    Callback: Fn(T) + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let snapshot = fetch(Arc::clone(&store)).await;
        deliver(&callback, snapshot, topic);
        loop {
            match rx.recv().await {
                Ok(changed) if changed == topic => {}
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, %topic, "subscriber lagged; resending latest");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
            let snapshot = fetch(Arc::clone(&store)).await;
            deliver(&callback, snapshot, topic);
        }
    });
    Subscription { handle }
}

fn deliver<T>(callback: &impl Fn(T), snapshot: Result<T, DatabaseError>, topic: Collection) {
    match snapshot {
        Ok(snapshot) => callback(snapshot),
        Err(error) => tracing::warn!(%error, %topic, "snapshot read failed"),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use lobby_core::entities::{Update, WaitlistEntry};
    use lobby_core::enums::StoreBackend;
    use lobby_core::inputs::NewUpdate;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    use crate::test_support::admin_service;

    async fn next<T>(rx: &mut mpsc::UnboundedReceiver<T>) -> T {
        timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("snapshot within deadline")
            .expect("channel open")
    }

    #[tokio::test]
    async fn waitlist_subscription_gets_initial_and_change_snapshots() {
        let svc = admin_service(StoreBackend::Memory).await;
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<WaitlistEntry>>();
        let sub = svc.subscribe_to_waitlist(move |snapshot| {
            let _ = tx.send(snapshot);
        });

        assert!(next(&mut rx).await.is_empty());

        svc.join_waitlist("live@test.com").await.unwrap();
        let snapshot = next(&mut rx).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].email, "live@test.com");
        assert!(sub.is_active());
        sub.unsubscribe();
    }

    #[tokio::test]
    async fn updates_subscription_ignores_waitlist_changes() {
        let svc = admin_service(StoreBackend::Libsql).await;
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<Update>>();
        let _sub = svc.subscribe_to_updates(move |snapshot| {
            let _ = tx.send(snapshot);
        });
        assert!(next(&mut rx).await.is_empty());

        svc.join_waitlist("quiet@test.com").await.unwrap();
        svc.post_update(&NewUpdate {
            title: "Live".into(),
            content: "now".into(),
            image_url: None,
        })
        .await
        .unwrap();

        let snapshot = next(&mut rx).await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].title, "Live");
    }

    #[tokio::test]
    async fn callback_need_not_be_sync() {
        let svc = admin_service(StoreBackend::Memory).await;
        let (tx, mut rx) = mpsc::unbounded_channel::<usize>();
        let deliveries = Cell::new(0_usize);
        let _sub = svc.subscribe_to_waitlist(move |_snapshot| {
            deliveries.set(deliveries.get() + 1);
            let _ = tx.send(deliveries.get());
        });
        assert_eq!(next(&mut rx).await, 1);

        svc.join_waitlist("cell@test.com").await.unwrap();
        assert_eq!(next(&mut rx).await, 2);
    }

    #[tokio::test]
    async fn unsubscribed_callback_stops_receiving() {
        let svc = admin_service(StoreBackend::Memory).await;
        let (tx, mut rx) = mpsc::unbounded_channel::<Vec<WaitlistEntry>>();
        let sub = svc.subscribe_to_waitlist(move |snapshot| {
            let _ = tx.send(snapshot);
        });
        next(&mut rx).await;
        sub.unsubscribe();

        svc.join_waitlist("late@test.com").await.unwrap();
        // The aborted task drops its sender, closing the channel.
        let closed = timeout(Duration::from_secs(2), rx.recv()).await.unwrap();
        assert!(closed.is_none());
    }
}
