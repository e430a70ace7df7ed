use lobby_config::LobbyConfig;

use crate::cli::root_commands::ServeArgs;

/// Handle `lobby serve`.
pub async fn handle(args: &ServeArgs, mut config: LobbyConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(host) = &args.host {
        config.server.host.clone_from(host);
    }
    if !config.admin.is_configured() {
        tracing::warn!("admin secret not configured; admin login is disabled");
    }
    lobby_server::serve(&config).await?;
    Ok(())
}
