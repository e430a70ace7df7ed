use lobby_core::entities::{ADMIN_AUTHOR, AdminSession, Update};
use lobby_core::enums::Collection;
use lobby_core::errors::CoreError;
use lobby_core::ids::{PREFIX_UPDATE, generate_id};

use super::LobbyService;
use crate::helpers::now;

pub const SEED_TITLE: &str = "Welcome to Lobby";
pub const SEED_CONTENT: &str =
    "Thank you for joining our waitlist! We'll keep you updated on our progress.";

impl LobbyService {
    /// Verify the admin password and open the session.
    pub async fn login(&self, password: &str) -> Result<AdminSession, CoreError> {
        Ok(self.gate.login(password).await?)
    }

    pub async fn logout(&self) -> Result<AdminSession, CoreError> {
        Ok(self.gate.logout().await?)
    }

    pub async fn session(&self) -> Result<AdminSession, CoreError> {
        Ok(self.gate.session().await?)
    }

    pub async fn is_authenticated(&self) -> Result<bool, CoreError> {
        Ok(self.gate.is_authenticated().await?)
    }

    /// Insert the sample welcome update and reset the session to logged out.
    ///
    /// Seeding runs from an operator shell before any admin can log in, so
    /// it skips the admin check. The session reset goes through the gate and
    /// lands wherever the configured session mode keeps the flag.
    pub async fn seed(&self) -> Result<Update, CoreError> {
        let at = now();
        let mut update = Update {
            id: generate_id(PREFIX_UPDATE)?,
            title: SEED_TITLE.to_string(),
            content: SEED_CONTENT.to_string(),
            image_url: None,
            created_at: at,
            updated_at: None,
            author: ADMIN_AUTHOR.to_string(),
            comments: Vec::new(),
        };
        self.insert_update_with_fresh_id(&mut update).await?;
        self.gate.logout().await?;
        tracing::info!(id = %update.id, "seeded sample update");
        self.changed(Collection::Updates);
        Ok(update)
    }
}
