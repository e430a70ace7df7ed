use lobby_core::inputs::NewComment;
use lobby_db::LobbyService;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::commands::Deleted;
use crate::output::output;

/// Handle `lobby comment <subcommand>`. Add and reply print the parent update.
pub async fn handle(
    action: &CommentCommands,
    service: &LobbyService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommentCommands::Add(args) => {
            let new = NewComment {
                user_email: args.email.clone(),
                content: args.content.clone(),
            };
            let update = service.add_comment(&args.update_id, &new).await?;
            output(&update, flags.format)
        }
        CommentCommands::Reply(args) => {
            let update = service
                .add_admin_reply(&args.update_id, &args.comment_id, &args.reply)
                .await?;
            output(&update, flags.format)
        }
        CommentCommands::Delete(args) => {
            service
                .delete_comment(&args.update_id, &args.comment_id)
                .await?;
            output(
                &Deleted {
                    deleted: &args.comment_id,
                },
                flags.format,
            )
        }
    }
}
