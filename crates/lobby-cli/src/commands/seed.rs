use lobby_db::LobbyService;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `lobby seed`.
pub async fn handle(service: &LobbyService, flags: &GlobalFlags) -> anyhow::Result<()> {
    let update = service.seed().await?;
    tracing::info!(id = %update.id, "seeded sample update");
    output(&update, flags.format)
}
