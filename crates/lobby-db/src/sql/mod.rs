//! libSQL adapter.
//!
//! Relational layout: `waitlist`, `updates`, `comments` (foreign key to
//! `updates`), and the singleton `admin_sessions` row. Works against a local
//! file, `:memory:`, or a remote libSQL server.

mod comments;
mod migrations;
mod session;
mod updates;
mod waitlist;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::Builder;
use lobby_core::entities::{AdminSession, Comment, Update, WaitlistEntry};

use crate::error::DatabaseError;
use crate::store::LobbyStore;
use crate::updates::update::UpdatePatch;

/// libSQL-backed [`LobbyStore`].
pub struct LibsqlStore {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    remote: bool,
}

impl LibsqlStore {
    /// Open a local database at the given path (`":memory:"` for tests).
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let store = Self {
            db,
            conn,
            remote: false,
        };
        store.run_migrations().await?;
        tracing::debug!(path, "opened local libSQL store");
        Ok(store)
    }

    /// Open a remote libSQL database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        let store = Self {
            db,
            conn,
            remote: true,
        };
        store.run_migrations().await?;
        tracing::debug!(url, "opened remote libSQL store");
        Ok(store)
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }
}

#[async_trait]
impl LobbyStore for LibsqlStore {
    fn backend_name(&self) -> &'static str {
        if self.remote { "libsql-remote" } else { "libsql" }
    }

    async fn insert_waitlist_entry(&self, entry: &WaitlistEntry) -> Result<(), DatabaseError> {
        waitlist::insert(&self.conn, entry).await
    }

    async fn find_waitlist_by_email(
        &self,
        email: &str,
    ) -> Result<Option<WaitlistEntry>, DatabaseError> {
        waitlist::find_by_email(&self.conn, email).await
    }

    async fn get_waitlist_entry(&self, id: &str) -> Result<Option<WaitlistEntry>, DatabaseError> {
        waitlist::get(&self.conn, id).await
    }

    async fn list_waitlist(&self) -> Result<Vec<WaitlistEntry>, DatabaseError> {
        waitlist::list(&self.conn).await
    }

    async fn set_feedback(
        &self,
        id: &str,
        feedback: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        waitlist::set_feedback(&self.conn, id, feedback, at).await
    }

    async fn delete_waitlist_entry(&self, id: &str) -> Result<bool, DatabaseError> {
        waitlist::delete(&self.conn, id).await
    }

    async fn insert_update(&self, update: &Update) -> Result<(), DatabaseError> {
        updates::insert(&self.conn, update).await
    }

    async fn get_update(&self, id: &str) -> Result<Option<Update>, DatabaseError> {
        updates::get(&self.conn, id).await
    }

    async fn list_updates(&self) -> Result<Vec<Update>, DatabaseError> {
        updates::list(&self.conn).await
    }

    async fn patch_update(
        &self,
        id: &str,
        patch: &UpdatePatch,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        updates::patch(&self.conn, id, patch, at).await
    }

    async fn delete_update(&self, id: &str) -> Result<bool, DatabaseError> {
        updates::delete(&self.conn, id).await
    }

    async fn insert_comment(&self, comment: &Comment) -> Result<bool, DatabaseError> {
        comments::insert(&self.conn, comment).await
    }

    async fn set_admin_reply(
        &self,
        update_id: &str,
        comment_id: &str,
        reply: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, DatabaseError> {
        comments::set_admin_reply(&self.conn, update_id, comment_id, reply, at).await
    }

    async fn delete_comment(
        &self,
        update_id: &str,
        comment_id: &str,
    ) -> Result<bool, DatabaseError> {
        comments::delete(&self.conn, update_id, comment_id).await
    }

    async fn load_admin_session(&self) -> Result<Option<AdminSession>, DatabaseError> {
        session::load(&self.conn).await
    }

    async fn save_admin_session(&self, session: &AdminSession) -> Result<(), DatabaseError> {
        session::save(&self.conn, session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> LibsqlStore {
        LibsqlStore::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let store = test_store().await;
        for table in ["waitlist", "updates", "comments", "admin_sessions"] {
            let mut rows = store
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let store = test_store().await;
        store.run_migrations().await.unwrap();
        assert!(!store.is_remote());
        assert_eq!(store.backend_name(), "libsql");
    }

    #[tokio::test]
    async fn reopening_a_file_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lobby.db");
        let path = path.to_str().unwrap();

        {
            let store = LibsqlStore::open_local(path).await.unwrap();
            store
                .save_admin_session(&AdminSession::logged_in(crate::helpers::now()))
                .await
                .unwrap();
        }

        let store = LibsqlStore::open_local(path).await.unwrap();
        let session = store.load_admin_session().await.unwrap().unwrap();
        assert!(session.authenticated);
    }
}
