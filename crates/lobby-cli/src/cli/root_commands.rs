use clap::{Args, Subcommand, ValueEnum};

use crate::cli::subcommands::{AdminCommands, CommentCommands, UpdateCommands, WaitlistCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP and WebSocket server.
    Serve(ServeArgs),
    /// Waitlist entries.
    Waitlist {
        #[command(subcommand)]
        action: WaitlistCommands,
    },
    /// Admin-authored updates.
    Update {
        #[command(subcommand)]
        action: UpdateCommands,
    },
    /// Comments on updates.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
    /// Admin session and credential helpers.
    Admin {
        #[command(subcommand)]
        action: AdminCommands,
    },
    /// Insert the sample update and a logged-out session.
    Seed,
    /// Print the JSON Schema of an entity type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct ServeArgs {
    /// Override `server.port`.
    #[arg(long)]
    pub port: Option<u16>,
    /// Override `server.host`.
    #[arg(long)]
    pub host: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    WaitlistEntry,
    Update,
    Comment,
    AdminSession,
    NewUpdate,
    NewComment,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Entity type to export.
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
