use lobby_core::errors::CoreError;
use lobby_db::LobbyService;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AdminCommands, AdminHashArgs};
use crate::output::output;

#[derive(Serialize)]
struct AdminStatusResponse {
    authenticated: bool,
    timestamp: String,
    login_enabled: bool,
}

#[derive(Serialize)]
struct HashResponse {
    secret_sha256: String,
}

/// Handle `lobby admin <subcommand>`.
pub async fn handle(
    action: &AdminCommands,
    service: &LobbyService,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AdminCommands::Login(args) => match service.login(&args.password).await {
            Ok(session) => output(&session, flags.format),
            Err(CoreError::Unauthorized) if service.gate().is_configured() => {
                anyhow::bail!("Invalid password")
            }
            Err(CoreError::Unauthorized) => {
                anyhow::bail!("admin login disabled; set LOBBY_ADMIN__SECRET or admin.secret_sha256")
            }
            Err(other) => Err(other.into()),
        },
        AdminCommands::Logout => output(&service.logout().await?, flags.format),
        AdminCommands::Status => {
            let session = service.session().await?;
            output(
                &AdminStatusResponse {
                    authenticated: session.authenticated,
                    timestamp: session.timestamp.to_rfc3339(),
                    login_enabled: service.gate().is_configured(),
                },
                flags.format,
            )
        }
        AdminCommands::Hash(args) => hash(args, flags),
    }
}

/// Handle `lobby admin hash`. Needs no store.
pub fn hash(args: &AdminHashArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    output(
        &HashResponse {
            secret_sha256: lobby_auth::hash_secret_hex(&args.secret),
        },
        flags.format,
    )
}
