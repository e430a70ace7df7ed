use clap::{Args, Subcommand};

/// Comment commands.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// Comment on an update.
    Add(CommentAddArgs),
    /// Set the admin reply on a comment.
    Reply(CommentReplyArgs),
    /// Remove a comment.
    Delete(CommentDeleteArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CommentAddArgs {
    pub update_id: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub content: String,
}

#[derive(Clone, Debug, Args)]
pub struct CommentReplyArgs {
    pub update_id: String,
    pub comment_id: String,
    pub reply: String,
}

#[derive(Clone, Debug, Args)]
pub struct CommentDeleteArgs {
    pub update_id: String,
    pub comment_id: String,
}
