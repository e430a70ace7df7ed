use clap::{Args, Subcommand};

/// Admin commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AdminCommands {
    /// Open an admin session.
    Login(AdminLoginArgs),
    /// Close the admin session.
    Logout,
    /// Show the current session.
    Status,
    /// Print the SHA-256 digest for `admin.secret_sha256`.
    Hash(AdminHashArgs),
}

#[derive(Clone, Debug, Args)]
pub struct AdminLoginArgs {
    #[arg(long)]
    pub password: String,
}

#[derive(Clone, Debug, Args)]
pub struct AdminHashArgs {
    pub secret: String,
}
