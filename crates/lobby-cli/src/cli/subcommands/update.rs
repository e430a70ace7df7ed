use clap::{Args, Subcommand};

/// Update commands.
#[derive(Clone, Debug, Subcommand)]
pub enum UpdateCommands {
    /// Publish a new update.
    Post(UpdatePostArgs),
    /// Change fields of an existing update.
    Edit(UpdateEditArgs),
    /// Delete an update and its comments.
    Delete { id: String },
    /// List updates, newest first.
    List,
    /// Show one update with its comments.
    Get { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct UpdatePostArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub content: String,
    #[arg(long)]
    pub image_url: Option<String>,
    /// Skip notifying the waitlist.
    #[arg(long)]
    pub no_notify: bool,
}

#[derive(Clone, Debug, Args)]
pub struct UpdateEditArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(long, conflicts_with = "clear_image")]
    pub image_url: Option<String>,
    /// Remove the image.
    #[arg(long)]
    pub clear_image: bool,
}
