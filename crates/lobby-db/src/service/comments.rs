use lobby_core::entities::{Comment, Update};
use lobby_core::enums::{Collection, EntityType};
use lobby_core::errors::CoreError;
use lobby_core::ids::{PREFIX_COMMENT, generate_id};
use lobby_core::inputs::NewComment;
use lobby_core::validation::{normalize_email, require_text};

use super::{LobbyService, retry_with_fresh_id};
use crate::helpers::now;

impl LobbyService {
    /// Attach a visitor comment and return the parent update. Public.
    ///
    /// A missing parent fails with `NotFound` before the input is validated
    /// and nothing is written.
    pub async fn add_comment(&self, update_id: &str, new: &NewComment) -> Result<Update, CoreError> {
        if self.store.get_update(update_id).await?.is_none() {
            return Err(CoreError::not_found(EntityType::Update, update_id));
        }

        let mut comment = Comment {
            id: generate_id(PREFIX_COMMENT)?,
            update_id: update_id.to_string(),
            user_email: normalize_email(&new.user_email)?,
            content: require_text("content", &new.content)?,
            created_at: now(),
            admin_reply: None,
            admin_reply_at: None,
        };
        let mut attempt = 1;
        let inserted = loop {
            match self.store.insert_comment(&comment).await {
                Ok(inserted) => break inserted,
                Err(error) => retry_with_fresh_id(error, attempt)?,
            }
            attempt += 1;
            comment.id = generate_id(PREFIX_COMMENT)?;
        };
        // The parent can disappear between the check and the insert.
        if !inserted {
            return Err(CoreError::not_found(EntityType::Update, update_id));
        }
        tracing::info!(id = %comment.id, update_id, "comment added");
        self.changed(Collection::Updates);
        self.get_update(update_id).await
    }

    /// Set or overwrite the admin reply on a comment. Admin only.
    pub async fn add_admin_reply(
        &self,
        update_id: &str,
        comment_id: &str,
        text: &str,
    ) -> Result<Update, CoreError> {
        self.require_admin().await?;
        self.require_comment(update_id, comment_id).await?;
        let reply = require_text("admin_reply", text)?;
        if !self
            .store
            .set_admin_reply(update_id, comment_id, &reply, now())
            .await?
        {
            return Err(CoreError::not_found(EntityType::Comment, comment_id));
        }
        self.changed(Collection::Updates);
        self.get_update(update_id).await
    }

    /// Remove one comment. Admin only.
    pub async fn delete_comment(&self, update_id: &str, comment_id: &str) -> Result<(), CoreError> {
        self.require_admin().await?;
        self.require_comment(update_id, comment_id).await?;
        if !self.store.delete_comment(update_id, comment_id).await? {
            return Err(CoreError::not_found(EntityType::Comment, comment_id));
        }
        tracing::info!(id = comment_id, update_id, "comment deleted");
        self.changed(Collection::Updates);
        Ok(())
    }

    /// Distinguish a missing update from a missing comment.
    async fn require_comment(&self, update_id: &str, comment_id: &str) -> Result<(), CoreError> {
        let update = self.get_update(update_id).await?;
        if update.comment(comment_id).is_none() {
            return Err(CoreError::not_found(EntityType::Comment, comment_id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::{admin_service, test_service};
    use lobby_core::enums::StoreBackend;
    use lobby_core::errors::CoreError;
    use lobby_core::inputs::{NewComment, NewUpdate};
    use rstest::rstest;

    fn comment(email: &str, content: &str) -> NewComment {
        NewComment {
            user_email: email.into(),
            content: content.into(),
        }
    }

    async fn post(svc: &crate::LobbyService) -> String {
        svc.post_update(&NewUpdate {
            title: "Hello".into(),
            content: "World".into(),
            image_url: None,
        })
        .await
        .unwrap()
        .id
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn comments_come_back_oldest_first(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let update_id = post(&svc).await;

        svc.add_comment(&update_id, &comment("a@test.com", "first"))
            .await
            .unwrap();
        let parent = svc
            .add_comment(&update_id, &comment("B@Test.com", "second"))
            .await
            .unwrap();

        assert_eq!(parent.id, update_id);
        let contents: Vec<&str> = parent.comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, ["first", "second"]);
        assert_eq!(parent.comments[1].user_email, "b@test.com");
        assert!(parent.comments.iter().all(|c| c.update_id == update_id));

        let listed = svc.list_updates().await.unwrap();
        assert_eq!(listed[0].comments, parent.comments);
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn comment_on_missing_update_creates_nothing(#[case] backend: StoreBackend) {
        let svc = test_service(backend).await;
        let err = svc
            .add_comment("upd-deadbeef", &comment("a@test.com", "hi"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Update not found: upd-deadbeef");
        assert!(svc.list_updates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn comment_input_is_validated() {
        let svc = admin_service(StoreBackend::Memory).await;
        let update_id = post(&svc).await;
        assert!(matches!(
            svc.add_comment(&update_id, &comment("nope", "hi")).await,
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            svc.add_comment(&update_id, &comment("a@test.com", "  ")).await,
            Err(CoreError::Validation(_))
        ));
        assert!(svc.get_update(&update_id).await.unwrap().comments.is_empty());
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn admin_reply_overwrites(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let update_id = post(&svc).await;
        let parent = svc
            .add_comment(&update_id, &comment("a@test.com", "question?"))
            .await
            .unwrap();
        let comment_id = parent.comments[0].id.clone();

        svc.add_admin_reply(&update_id, &comment_id, "answer")
            .await
            .unwrap();
        let parent = svc
            .add_admin_reply(&update_id, &comment_id, "better answer")
            .await
            .unwrap();
        let reply = parent.comment(&comment_id).unwrap();
        assert_eq!(reply.admin_reply.as_deref(), Some("better answer"));
        assert!(reply.admin_reply_at.is_some());
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn reply_and_delete_report_missing_comment(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let update_id = post(&svc).await;

        let err = svc
            .add_admin_reply(&update_id, "cmt-deadbeef", "x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Comment not found: cmt-deadbeef");

        let err = svc
            .delete_comment("upd-deadbeef", "cmt-deadbeef")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Update not found: upd-deadbeef");
    }

    #[rstest]
    #[case::libsql(StoreBackend::Libsql)]
    #[case::memory(StoreBackend::Memory)]
    #[tokio::test]
    async fn deleting_update_removes_its_comments(#[case] backend: StoreBackend) {
        let svc = admin_service(backend).await;
        let update_id = post(&svc).await;
        let parent = svc
            .add_comment(&update_id, &comment("a@test.com", "hi"))
            .await
            .unwrap();

        svc.delete_comment(&update_id, &parent.comments[0].id)
            .await
            .unwrap();
        assert!(svc.get_update(&update_id).await.unwrap().comments.is_empty());

        svc.add_comment(&update_id, &comment("a@test.com", "again"))
            .await
            .unwrap();
        svc.delete_update(&update_id).await.unwrap();
        assert!(svc.list_updates().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reply_requires_admin_before_lookup() {
        let svc = test_service(StoreBackend::Memory).await;
        assert!(matches!(
            svc.add_admin_reply("upd-deadbeef", "cmt-deadbeef", "x").await,
            Err(CoreError::Unauthorized)
        ));
        assert!(matches!(
            svc.delete_comment("upd-deadbeef", "cmt-deadbeef").await,
            Err(CoreError::Unauthorized)
        ));
    }
}
