//! The storage port.
//!
//! Every persistence backend implements [`LobbyStore`]. The trait speaks in
//! domain entities and leaves validation, authorization, and timestamp
//! stamping to [`crate::service::LobbyService`].
//!
//! Lookups return `Ok(None)` for a missing row. Targeted mutations return
//! `Ok(false)` when nothing matched.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lobby_core::entities::{AdminSession, Comment, Update, WaitlistEntry};

use crate::error::DatabaseError;
use crate::updates::update::UpdatePatch;

#[async_trait]
pub trait LobbyStore: Send + Sync {
    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;

    // -- waitlist --

    /// Insert a new entry. Fails with `DatabaseError::Conflict(email)` when
    /// the email is already present and `DatabaseError::IdTaken` when the ID is.
    async fn insert_waitlist_entry(&self, entry: &WaitlistEntry) -> Result<(), DatabaseError>;

    async fn find_waitlist_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, DatabaseError>;

    async fn get_waitlist_entry(&self, id: &str) -> Result<Option<WaitlistEntry>, DatabaseError>;

    /// All entries, `joined_at` descending, newest insert first on ties.
    async fn list_waitlist(&self) -> Result<Vec<WaitlistEntry>, DatabaseError>;

    async fn set_feedback(
        &self,
        id: &str,
        feedback: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError>;

    async fn delete_waitlist_entry(&self, id: &str) -> Result<bool, DatabaseError>;

    // -- updates --

    /// Fails with `DatabaseError::IdTaken` when the ID is already in use.
    async fn insert_update(&self, update: &Update) -> Result<(), DatabaseError>;

    /// One update with its comments, `created_at` ascending.
    async fn get_update(&self, id: &str) -> Result<Option<Update>, DatabaseError>;

    /// All updates with comments, `created_at` descending.
    async fn list_updates(&self) -> Result<Vec<Update>, DatabaseError>;

    async fn patch_update(
        &self,
        id: &str,
        patch: &UpdatePatch,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError>;

    /// Remove an update and every comment under it.
    async fn delete_update(&self, id: &str) -> Result<bool, DatabaseError>;

    // -- comments --

    /// Attach a comment to `comment.update_id`. Returns `false` and writes
    /// nothing if the parent update does not exist. Fails with
    /// `DatabaseError::IdTaken` when the comment ID is already in use.
    async fn insert_comment(&self, comment: &Comment) -> Result<bool, DatabaseError>;

    async fn set_admin_reply(
        &self,
        update_id: &str,
        comment_id: &str,
        reply: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError>;

    async fn delete_comment(&self, update_id: &str, comment_id: &str)
    -> Result<bool, DatabaseError>;

    // -- admin session --

    async fn load_admin_session(&self) -> Result<Option<AdminSession>, DatabaseError>;

    /// Overwrite the singleton session record.
    async fn save_admin_session(&self, session: &AdminSession) -> Result<(), DatabaseError>;
}
