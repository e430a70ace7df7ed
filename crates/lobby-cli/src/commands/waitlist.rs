use lobby_config::LobbyConfig;
use lobby_db::LobbyService;
use lobby_mail::{Delivery, mailer_from_config};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::WaitlistCommands;
use crate::commands::Deleted;
use crate::output::output;

/// Handle `lobby waitlist <subcommand>`.
pub async fn handle(
    action: &WaitlistCommands,
    service: &LobbyService,
    config: &LobbyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        WaitlistCommands::Join { email, no_email } => {
            let entry = service.join_waitlist(email).await?;
            if !no_email {
                send_welcome(config, &entry.email).await;
            }
            output(&entry, flags.format)
        }
        WaitlistCommands::List => output(&service.list_waitlist().await?, flags.format),
        WaitlistCommands::Feedback(args) => {
            let entry = service.set_feedback(&args.id, &args.feedback).await?;
            output(&entry, flags.format)
        }
        WaitlistCommands::Delete { id } => {
            service.delete_waitlist_entry(id).await?;
            output(&Deleted { deleted: id }, flags.format)
        }
    }
}

/// The join already succeeded; mail problems are only logged.
async fn send_welcome(config: &LobbyConfig, email: &str) {
    let mailer = match mailer_from_config(config) {
        Ok(mailer) => mailer,
        Err(error) => {
            tracing::warn!(%error, "mail client unavailable");
            return;
        }
    };
    match mailer.send_welcome(email).await {
        Ok(Delivery::Sent) => tracing::info!(to = %email, "welcome email sent"),
        Ok(Delivery::Skipped) => tracing::debug!("welcome template not configured"),
        Err(error) => tracing::warn!(%error, to = %email, "welcome email failed"),
    }
}
