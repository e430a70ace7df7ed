use lobby_core::entities::WaitlistEntry;
use lobby_core::enums::{Collection, EntityType};
use lobby_core::errors::CoreError;
use lobby_core::ids::{PREFIX_WAITLIST, generate_id};
use lobby_core::validation::{normalize_email, require_text};

use super::{LobbyService, retry_with_fresh_id};
use super::feed::{Subscription, spawn_snapshots};
use crate::helpers::now;

impl LobbyService {
    /// Add an email to the waitlist. Public.
    ///
    /// The email is trimmed and lowercased before the uniqueness check, so
    /// `A@Test.com` and ` a@test.com` are the same entry.
    pub async fn join_waitlist(&self, email: &str) -> Result<WaitlistEntry, CoreError> {
        let email = normalize_email(email)?;
        if self.store.find_waitlist_by_email(&email).await?.is_some() {
            return Err(CoreError::DuplicateEmail { email });
        }

        let mut attempt = 0;
        let entry = loop {
            attempt += 1;
            let entry = WaitlistEntry {
                id: generate_id(PREFIX_WAITLIST)?,
                email: email.clone(),
                joined_at: now(),
                feedback: None,
                feedback_at: None,
            };
            match self.store.insert_waitlist_entry(&entry).await {
                Ok(()) => break entry,
                Err(error) => retry_with_fresh_id(error, attempt)?,
            }
        };
        tracing::info!(id = %entry.id, "waitlist entry created");
        self.changed(Collection::Waitlist);
        Ok(entry)
    }

    /// All entries, newest first. Public.
    pub async fn list_waitlist(&self) -> Result<Vec<WaitlistEntry>, CoreError> {
        Ok(self.store.list_waitlist().await?)
    }

    /// Overwrite an entry's feedback. Admin only.
    pub async fn set_feedback(&self, id: &str, text: &str) -> Result<WaitlistEntry, CoreError> {
        self.require_admin().await?;
        let feedback = require_text("feedback", text)?;
        if !self.store.set_feedback(id, &feedback, now()).await? {
            return Err(CoreError::not_found(EntityType::WaitlistEntry, id));
        }
        let entry = self
            .store
            .get_waitlist_entry(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::WaitlistEntry, id))?;
        self.changed(Collection::Waitlist);
        Ok(entry)
    }

    /// Remove an entry. Admin only.
    pub async fn delete_waitlist_entry(&self, id: &str) -> Result<(), CoreError> {
        self.require_admin().await?;
        if !self.store.delete_waitlist_entry(id).await? {
            return Err(CoreError::not_found(EntityType::WaitlistEntry, id));
        }
        tracing::info!(id, "waitlist entry deleted");
        self.changed(Collection::Waitlist);
        Ok(())
    }

    /// Deliver the full waitlist now and after every waitlist change.
    pub fn subscribe_to_waitlist<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Vec<WaitlistEntry>) + Send + 'static,
    {
        spawn_snapshots(
            std::sync::Arc::clone(&self.store),
            self.feed.receiver(),
            Collection::Waitlist,
            |store| async move { store.list_waitlist().await },
            callback,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{admin_service, test_service};
    use lobby_core::enums::StoreBackend;
    use lobby_core::errors::CoreError;
    use lobby_core::ids::{PREFIX_WAITLIST, is_well_formed};
    use rstest::rstest;

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn join_normalizes_and_stamps(#[case] backend: StoreBackend) {
        let svc = test_service(backend).await;
        let entry = svc.join_waitlist("  A@Test.COM ").await.unwrap();
        assert_eq!(entry.email, "a@test.com");
        assert!(is_well_formed(&entry.id, PREFIX_WAITLIST));
        assert!(entry.feedback.is_none());

        let listed = svc.list_waitlist().await.unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn duplicate_email_is_rejected_across_case(#[case] backend: StoreBackend) {
        let svc = test_service(backend).await;
        svc.join_waitlist("a@test.com").await.unwrap();

        for variant in ["a@test.com", "A@TEST.com", " a@test.com  "] {
            let err = svc.join_waitlist(variant).await.unwrap_err();
            assert!(
                matches!(err, CoreError::DuplicateEmail { ref email } if email == "a@test.com"),
                "{variant}: {err:?}"
            );
        }
        assert_eq!(svc.list_waitlist().await.unwrap().len(), 1);
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn store_level_conflict_maps_to_duplicate(#[case] backend: StoreBackend) {
        let svc = test_service(backend).await;
        let entry = svc.join_waitlist("race@test.com").await.unwrap();
        let mut clash = entry.clone();
        clash.id = "wl-00000000".into();
        let err: CoreError = svc
            .store()
            .insert_waitlist_entry(&clash)
            .await
            .unwrap_err()
            .into();
        assert!(matches!(err, CoreError::DuplicateEmail { .. }));
    }

    #[tokio::test]
    async fn invalid_email_writes_nothing() {
        let svc = test_service(StoreBackend::Memory).await;
        assert!(matches!(
            svc.join_waitlist("not-an-email").await,
            Err(CoreError::Validation(_))
        ));
        assert!(svc.list_waitlist().await.unwrap().is_empty());
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn list_is_newest_first(#[case] backend: StoreBackend) {
        let svc = test_service(backend).await;
        for email in ["one@test.com", "two@test.com", "three@test.com"] {
            svc.join_waitlist(email).await.unwrap();
        }
        let emails: Vec<String> = svc
            .list_waitlist()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.email)
            .collect();
        assert_eq!(emails, ["three@test.com", "two@test.com", "one@test.com"]);
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn feedback_overwrites_and_stamps(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let entry = svc.join_waitlist("fb@test.com").await.unwrap();

        let first = svc.set_feedback(&entry.id, "Loved it").await.unwrap();
        assert_eq!(first.feedback.as_deref(), Some("Loved it"));
        assert!(first.feedback_at.is_some());

        let second = svc.set_feedback(&entry.id, "Changed my mind").await.unwrap();
        assert_eq!(second.feedback.as_deref(), Some("Changed my mind"));
        assert!(second.feedback_at >= first.feedback_at);
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn delete_unknown_is_not_found_and_known_is_gone(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        assert!(matches!(
            svc.delete_waitlist_entry("wl-deadbeef").await,
            Err(CoreError::NotFound { .. })
        ));

        let entry = svc.join_waitlist("gone@test.com").await.unwrap();
        svc.delete_waitlist_entry(&entry.id).await.unwrap();
        assert!(svc.list_waitlist().await.unwrap().is_empty());
        // Email is free again.
        svc.join_waitlist("gone@test.com").await.unwrap();
    }

    #[tokio::test]
    async fn admin_operations_require_login() {
        let svc = test_service(StoreBackend::Memory).await;
        let entry = svc.join_waitlist("x@test.com").await.unwrap();

        assert!(matches!(
            svc.set_feedback(&entry.id, "hi").await,
            Err(CoreError::Unauthorized)
        ));
        // Authorization is checked before existence.
        assert!(matches!(
            svc.delete_waitlist_entry("wl-deadbeef").await,
            Err(CoreError::Unauthorized)
        ));
    }
}
