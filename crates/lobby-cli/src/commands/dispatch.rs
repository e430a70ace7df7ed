use anyhow::Context;
use lobby_config::LobbyConfig;
use lobby_db::LobbyService;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Load configuration, open the service, and run the parsed command.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = LobbyConfig::load().context("failed to load lobby configuration")?;

    if let Commands::Serve(args) = &command {
        return commands::serve::handle(args, config).await;
    }

    let service = LobbyService::from_config(&config)
        .await
        .context("failed to open lobby store")?;

    match command {
        Commands::Waitlist { action } => {
            commands::waitlist::handle(&action, &service, &config, flags).await
        }
        Commands::Update { action } => {
            commands::update::handle(&action, &service, &config, flags).await
        }
        Commands::Comment { action } => commands::comment::handle(&action, &service, flags).await,
        Commands::Admin { action } => commands::admin::handle(&action, &service, flags).await,
        Commands::Seed => commands::seed::handle(&service, flags).await,
        Commands::Serve(_) | Commands::Schema(_) => {
            unreachable!("serve/schema are handled before the store opens")
        }
    }
}
