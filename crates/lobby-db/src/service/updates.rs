use lobby_core::entities::{ADMIN_AUTHOR, Update};
use lobby_core::enums::{Collection, EntityType};
use lobby_core::errors::CoreError;
use lobby_core::ids::{PREFIX_UPDATE, generate_id};
use lobby_core::inputs::NewUpdate;
use lobby_core::validation::{optional_text, require_text};

use super::{LobbyService, retry_with_fresh_id};
use super::feed::{Subscription, spawn_snapshots};
use crate::helpers::now;
use crate::updates::update::UpdatePatch;

impl LobbyService {
    /// Publish an announcement. Admin only.
    pub async fn post_update(&self, new: &NewUpdate) -> Result<Update, CoreError> {
        self.require_admin().await?;
        let mut update = Update {
            id: generate_id(PREFIX_UPDATE)?,
            title: require_text("title", &new.title)?,
            content: require_text("content", &new.content)?,
            image_url: optional_text(new.image_url.as_deref()),
            created_at: now(),
            updated_at: None,
            author: ADMIN_AUTHOR.to_string(),
            comments: Vec::new(),
        };
        self.insert_update_with_fresh_id(&mut update).await?;
        tracing::info!(id = %update.id, "update posted");
        self.changed(Collection::Updates);
        Ok(update)
    }

    /// Insert `update`, replacing its ID while the store reports a clash.
    pub(super) async fn insert_update_with_fresh_id(
        &self,
        update: &mut Update,
    ) -> Result<(), CoreError> {
        let mut attempt = 1;
        loop {
            match self.store.insert_update(update).await {
                Ok(()) => return Ok(()),
                Err(error) => retry_with_fresh_id(error, attempt)?,
            }
            attempt += 1;
            update.id = generate_id(PREFIX_UPDATE)?;
        }
    }

    /// Overwrite the supplied fields and stamp `updated_at`. Admin only.
    pub async fn edit_update(&self, id: &str, patch: &UpdatePatch) -> Result<Update, CoreError> {
        self.require_admin().await?;
        if patch.is_empty() {
            return Err(CoreError::validation("Nothing to update"));
        }
        let patch = UpdatePatch {
            title: patch
                .title
                .as_deref()
                .map(|t| require_text("title", t))
                .transpose()?,
            content: patch
                .content
                .as_deref()
                .map(|c| require_text("content", c))
                .transpose()?,
            image_url: patch
                .image_url
                .as_ref()
                .map(|url| optional_text(url.as_deref())),
        };
        if !self.store.patch_update(id, &patch, now()).await? {
            return Err(CoreError::not_found(EntityType::Update, id));
        }
        let update = self.get_update(id).await?;
        self.changed(Collection::Updates);
        Ok(update)
    }

    /// Remove an update together with its comments. Admin only.
    pub async fn delete_update(&self, id: &str) -> Result<(), CoreError> {
        self.require_admin().await?;
        if !self.store.delete_update(id).await? {
            return Err(CoreError::not_found(EntityType::Update, id));
        }
        tracing::info!(id, "update deleted");
        self.changed(Collection::Updates);
        Ok(())
    }

    /// One update with its comments. Public.
    pub async fn get_update(&self, id: &str) -> Result<Update, CoreError> {
        self.store
            .get_update(id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityType::Update, id))
    }

    /// All updates with comments, newest first. Public.
    pub async fn list_updates(&self) -> Result<Vec<Update>, CoreError> {
        Ok(self.store.list_updates().await?)
    }

    /// Deliver every update now and after every update or comment change.
    pub fn subscribe_to_updates<F>(&self, callback: F) -> Subscription
    where
        F: Fn(Vec<Update>) + Send + 'static,
    {
        spawn_snapshots(
            std::sync::Arc::clone(&self.store),
            self.feed.receiver(),
            Collection::Updates,
            |store| async move { store.list_updates().await },
            callback,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{admin_service, test_service};
    use crate::updates::update::UpdatePatchBuilder;
    use lobby_core::entities::ADMIN_AUTHOR;
    use lobby_core::enums::StoreBackend;
    use lobby_core::errors::CoreError;
    use lobby_core::inputs::NewUpdate;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn new_update(title: &str) -> NewUpdate {
        NewUpdate {
            title: title.into(),
            content: format!("{title} body"),
            image_url: None,
        }
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn post_stamps_author_and_empty_comments(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let update = svc
            .post_update(&NewUpdate {
                title: " Beta opens ".into(),
                content: "Next week".into(),
                image_url: Some("   ".into()),
            })
            .await
            .unwrap();
        assert_eq!(update.title, "Beta opens");
        assert_eq!(update.author, ADMIN_AUTHOR);
        assert_eq!(update.image_url, None);
        assert!(update.comments.is_empty());

        let listed = svc.list_updates().await.unwrap();
        assert_eq!(listed, vec![update.clone()]);
        assert_eq!(svc.get_update(&update.id).await.unwrap(), update);
    }

    #[rstest]
    #[case("", "body")]
    #[case("title", "  ")]
    #[tokio::test]
    async fn post_requires_title_and_content(#[case] title: &str, #[case] content: &str) {
        let svc = admin_service(StoreBackend::Memory).await;
        let result = svc
            .post_update(&NewUpdate {
                title: title.into(),
                content: content.into(),
                image_url: None,
            })
            .await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
        assert!(svc.list_updates().await.unwrap().is_empty());
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn list_is_newest_first(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        for title in ["first", "second", "third"] {
            svc.post_update(&new_update(title)).await.unwrap();
        }
        let titles: Vec<String> = svc
            .list_updates()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.title)
            .collect();
        assert_eq!(titles, ["third", "second", "first"]);
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn edit_overwrites_supplied_fields_only(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let original = svc
            .post_update(&NewUpdate {
                title: "Launch".into(),
                content: "Soon".into(),
                image_url: Some("https://img.example.com/a.png".into()),
            })
            .await
            .unwrap();

        let edited = svc
            .edit_update(&original.id, &UpdatePatchBuilder::new().content("Now").build())
            .await
            .unwrap();
        assert_eq!(edited.title, "Launch");
        assert_eq!(edited.content, "Now");
        assert_eq!(edited.image_url, original.image_url);
        assert!(edited.updated_at.is_some());
        assert_eq!(edited.created_at, original.created_at);

        let cleared = svc
            .edit_update(&original.id, &UpdatePatchBuilder::new().image_url(None).build())
            .await
            .unwrap();
        assert_eq!(cleared.image_url, None);
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn empty_edit_is_rejected_without_stamping(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let update = svc.post_update(&new_update("Untouched")).await.unwrap();

        let result = svc
            .edit_update(&update.id, &UpdatePatchBuilder::new().build())
            .await;
        assert!(matches!(result, Err(CoreError::Validation(_))));

        let stored = svc.get_update(&update.id).await.unwrap();
        assert_eq!(stored.updated_at, None);
        assert_eq!(stored, update);
    }

    #[tokio::test]
    async fn edit_rejects_blank_title_and_unknown_id() {
        let svc = admin_service(StoreBackend::Memory).await;
        let update = svc.post_update(&new_update("Keep")).await.unwrap();
        assert!(matches!(
            svc.edit_update(&update.id, &UpdatePatchBuilder::new().title(" ").build())
                .await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            svc.edit_update("upd-deadbeef", &UpdatePatchBuilder::new().title("x").build())
                .await,
            Err(CoreError::NotFound { .. })
        ));
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn get_and_delete_unknown_are_not_found(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        assert!(matches!(
            svc.get_update("upd-deadbeef").await,
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            svc.delete_update("upd-deadbeef").await,
            Err(CoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn logged_out_cannot_post() {
        let svc = test_service(StoreBackend::Memory).await;
        assert!(matches!(
            svc.post_update(&new_update("nope")).await,
            Err(CoreError::Unauthorized)
        ));
        assert!(svc.list_updates().await.unwrap().is_empty());
    }
}
