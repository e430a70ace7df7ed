use lobby_config::LobbyConfig;
use lobby_core::entities::Update;
use lobby_core::inputs::NewUpdate;
use lobby_db::{LobbyService, UpdatePatchBuilder};
use lobby_mail::{mailer_from_config, notify_waitlist};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{UpdateCommands, UpdateEditArgs, UpdatePostArgs};
use crate::commands::Deleted;
use crate::output::output;

/// Handle `lobby update <subcommand>`.
pub async fn handle(
    action: &UpdateCommands,
    service: &LobbyService,
    config: &LobbyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        UpdateCommands::Post(args) => {
            let update = service.post_update(&new_update(args)).await?;
            if !args.no_notify {
                notify(service, config, &update).await;
            }
            output(&update, flags.format)
        }
        UpdateCommands::Edit(args) => {
            let patch = patch_from_args(args).build();
            let update = service.edit_update(&args.id, &patch).await?;
            output(&update, flags.format)
        }
        UpdateCommands::Delete { id } => {
            service.delete_update(id).await?;
            output(&Deleted { deleted: id }, flags.format)
        }
        UpdateCommands::List => output(&service.list_updates().await?, flags.format),
        UpdateCommands::Get { id } => output(&service.get_update(id).await?, flags.format),
    }
}

fn new_update(args: &UpdatePostArgs) -> NewUpdate {
    NewUpdate {
        title: args.title.clone(),
        content: args.content.clone(),
        image_url: args.image_url.clone(),
    }
}

fn patch_from_args(args: &UpdateEditArgs) -> UpdatePatchBuilder {
    let mut builder = UpdatePatchBuilder::new();
    if let Some(title) = &args.title {
        builder = builder.title(title);
    }
    if let Some(content) = &args.content {
        builder = builder.content(content);
    }
    if args.clear_image {
        builder = builder.image_url(None);
    } else if let Some(url) = &args.image_url {
        builder = builder.image_url(Some(url.clone()));
    }
    builder
}

/// Runs to completion before the process exits, unlike the server's spawned fan-out.
async fn notify(service: &LobbyService, config: &LobbyConfig, update: &Update) {
    let mailer = match mailer_from_config(config) {
        Ok(mailer) => mailer,
        Err(error) => {
            tracing::warn!(%error, "mail client unavailable");
            return;
        }
    };
    match service.list_waitlist().await {
        Ok(recipients) => {
            notify_waitlist(mailer.as_ref(), &recipients, update).await;
        }
        Err(error) => tracing::warn!(%error, "could not load waitlist for notifications"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn edit_args() -> UpdateEditArgs {
        UpdateEditArgs {
            id: "upd-12345678".into(),
            title: None,
            content: None,
            image_url: None,
            clear_image: false,
        }
    }

    #[test]
    fn edit_without_flags_builds_empty_patch() {
        // Rejected by the service as a validation error.
        assert!(patch_from_args(&edit_args()).build().is_empty());
    }

    #[test]
    fn clear_image_sets_explicit_none() {
        let args = UpdateEditArgs {
            clear_image: true,
            ..edit_args()
        };
        let patch = patch_from_args(&args).build();
        assert_eq!(patch.image_url, Some(None));
        assert_eq!(patch.title, None);
    }

    #[test]
    fn title_only_edit() {
        let args = UpdateEditArgs {
            title: Some("Renamed".into()),
            ..edit_args()
        };
        let patch = patch_from_args(&args).build();
        assert_eq!(patch.title.as_deref(), Some("Renamed"));
        assert_eq!(patch.image_url, None);
    }
}
