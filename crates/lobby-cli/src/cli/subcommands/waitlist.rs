use clap::{Args, Subcommand};

/// Waitlist commands.
#[derive(Clone, Debug, Subcommand)]
pub enum WaitlistCommands {
    /// Add an email to the waitlist.
    Join {
        email: String,
        /// Skip the welcome email.
        #[arg(long)]
        no_email: bool,
    },
    /// List entries, newest first.
    List,
    /// Attach admin feedback to an entry.
    Feedback(WaitlistFeedbackArgs),
    /// Remove an entry.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct WaitlistFeedbackArgs {
    /// Waitlist entry ID (`wl-...`).
    pub id: String,
    pub feedback: String,
}
