//! In-process document store.
//!
//! Each update is one document with its comments embedded, the way a
//! document database would hold them. Collections keep insertion order so
//! ties on timestamp resolve the same way as the libSQL adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lobby_core::entities::{AdminSession, Comment, Update, WaitlistEntry};
use tokio::sync::RwLock;

use crate::error::DatabaseError;
use crate::store::LobbyStore;
use crate::updates::update::UpdatePatch;

#[derive(Debug, Default)]
struct Documents {
    waitlist: Vec<WaitlistEntry>,
    updates: Vec<Update>,
    session: Option<AdminSession>,
}

/// Memory-backed [`LobbyStore`]. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; on equal keys the later insert comes first.
fn newest_first<T: Clone>(items: &[T], key: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by(|a, b| key(b).cmp(&key(a)));
    out
}

fn with_sorted_comments(mut update: Update) -> Update {
    update.comments.sort_by_key(|c| c.created_at);
    update
}

#[async_trait]
impl LobbyStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert_waitlist_entry(&self, entry: &WaitlistEntry) -> Result<(), DatabaseError> {
        let mut docs = self.docs.write().await;
        if docs.waitlist.iter().any(|e| e.email == entry.email) {
            return Err(DatabaseError::Conflict(entry.email.clone()));
        }
        if docs.waitlist.iter().any(|e| e.id == entry.id) {
            return Err(DatabaseError::IdTaken(entry.id.clone()));
        }
        docs.waitlist.push(entry.clone());
        Ok(())
    }

    async fn find_waitlist_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, DatabaseError> {
        let docs = self.docs.read().await;
        Ok(docs.waitlist.iter().find(|e| e.email == email).cloned())
    }

    async fn get_waitlist_entry(&self, id: &str) -> Result<Option<WaitlistEntry>, DatabaseError> {
        let docs = self.docs.read().await;
        Ok(docs.waitlist.iter().find(|e| e.id == id).cloned())
    }

    async fn list_waitlist(&self) -> Result<Vec<WaitlistEntry>, DatabaseError> {
        let docs = self.docs.read().await;
        Ok(newest_first(&docs.waitlist, |e| e.joined_at))
    }

    async fn set_feedback(
        &self,
        id: &str,
        feedback: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let mut docs = self.docs.write().await;
        let Some(entry) = docs.waitlist.iter_mut().find(|e| e.id == id) else {
            return Ok(false);
        };
        entry.feedback = Some(feedback.to_string());
        entry.feedback_at = Some(at);
        Ok(true)
    }

    async fn delete_waitlist_entry(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut docs = self.docs.write().await;
        let before = docs.waitlist.len();
        docs.waitlist.retain(|e| e.id != id);
        Ok(docs.waitlist.len() < before)
    }

    async fn insert_update(&self, update: &Update) -> Result<(), DatabaseError> {
        let mut docs = self.docs.write().await;
        if docs.updates.iter().any(|u| u.id == update.id) {
            return Err(DatabaseError::IdTaken(update.id.clone()));
        }
        docs.updates.push(update.clone());
        Ok(())
    }

    async fn get_update(&self, id: &str) -> Result<Option<Update>, DatabaseError> {
        let docs = self.docs.read().await;
        Ok(docs
            .updates
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(with_sorted_comments))
    }

    async fn list_updates(&self) -> Result<Vec<Update>, DatabaseError> {
        let docs = self.docs.read().await;
        Ok(newest_first(&docs.updates, |u| u.created_at)
            .into_iter()
            .map(with_sorted_comments)
            .collect())
    }

    async fn patch_update(
        &self,
        id: &str,
        patch: &UpdatePatch,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let mut docs = self.docs.write().await;
        let Some(update) = docs.updates.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        if let Some(title) = &patch.title {
            update.title.clone_from(title);
        }
        if let Some(content) = &patch.content {
            update.content.clone_from(content);
        }
        if let Some(image_url) = &patch.image_url {
            update.image_url.clone_from(image_url);
        }
        update.updated_at = Some(at);
        Ok(true)
    }

    async fn delete_update(&self, id: &str) -> Result<bool, DatabaseError> {
        let mut docs = self.docs.write().await;
        let before = docs.updates.len();
        docs.updates.retain(|u| u.id != id);
        Ok(docs.updates.len() < before)
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<bool, DatabaseError> {
        let mut docs = self.docs.write().await;
        let taken = docs
            .updates
            .iter()
            .flat_map(|u| &u.comments)
            .any(|c| c.id == comment.id);
        let Some(update) = docs.updates.iter_mut().find(|u| u.id == comment.update_id) else {
            return Ok(false);
        };
        if taken {
            return Err(DatabaseError::IdTaken(comment.id.clone()));
        }
        update.comments.push(comment.clone());
        Ok(true)
    }

    async fn set_admin_reply(
        &self,
        update_id: &str,
        comment_id: &str,
        reply: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        let mut docs = self.docs.write().await;
        let comment = docs
            .updates
            .iter_mut()
            .find(|u| u.id == update_id)
            .and_then(|u| u.comments.iter_mut().find(|c| c.id == comment_id));
        let Some(comment) = comment else {
            return Ok(false);
        };
        comment.admin_reply = Some(reply.to_string());
        comment.admin_reply_at = Some(at);
        Ok(true)
    }

    async fn delete_comment(
        &self,
        update_id: &str,
        comment_id: &str,
    ) -> Result<bool, DatabaseError> {
        let mut docs = self.docs.write().await;
        let Some(update) = docs.updates.iter_mut().find(|u| u.id == update_id) else {
            return Ok(false);
        };
        let before = update.comments.len();
        update.comments.retain(|c| c.id != comment_id);
        Ok(update.comments.len() < before)
    }

    async fn load_admin_session(&self) -> Result<Option<AdminSession>, DatabaseError> {
        Ok(self.docs.read().await.session.clone())
    }

    async fn save_admin_session(&self, session: &AdminSession) -> Result<(), DatabaseError> {
        self.docs.write().await.session = Some(session.clone());
        Ok(())
    }
}
