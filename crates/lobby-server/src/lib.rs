//! # lobby-server
//!
//! HTTP surface for Lobby: a JSON REST API under `/api`, a WebSocket
//! channel at `/ws`, and `/healthz`. Handlers are thin; all domain rules
//! live in [`lobby_db::LobbyService`].

pub mod error;
mod mail;
pub mod realtime;
pub mod routes;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, patch, post},
};
use lobby_config::{LobbyConfig, ServerConfig};
use lobby_db::{DatabaseError, LobbyService};
use lobby_mail::{MailError, mailer_from_config};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub use error::ApiError;
pub use state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Mail(#[from] MailError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .route("/healthz", get(routes::healthz_handler))
        .route(
            "/api/waitlist",
            post(routes::waitlist::join_handler).get(routes::waitlist::list_handler),
        )
        .route(
            "/api/waitlist/{id}",
            patch(routes::waitlist::feedback_handler).delete(routes::waitlist::delete_handler),
        )
        .route(
            "/api/updates",
            post(routes::updates::create_handler).get(routes::updates::list_handler),
        )
        .route(
            "/api/updates/{id}",
            get(routes::updates::get_handler)
                .patch(routes::updates::edit_handler)
                .delete(routes::updates::delete_handler),
        )
        .route(
            "/api/updates/{update_id}/comments",
            post(routes::comments::create_handler),
        )
        .route(
            "/api/updates/{update_id}/comments/{comment_id}",
            patch(routes::comments::reply_handler).delete(routes::comments::delete_handler),
        )
        .route("/api/admin/login", post(routes::admin::login_handler))
        .route("/api/admin/logout", post(routes::admin::logout_handler))
        .route("/api/admin/session", get(routes::admin::session_handler))
        .route("/ws", get(realtime::ws_handler))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if config.allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%error, origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Open the configured store and mailer, bind, and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns `ServerError` if the store cannot be opened, the address cannot
/// be bound, or the server loop fails.
pub async fn serve(config: &LobbyConfig) -> Result<(), ServerError> {
    info!("Initializing state...");
    let service = Arc::new(LobbyService::from_config(config).await?);
    let mailer = mailer_from_config(config)?;
    let state = AppState::new(service, mailer);
    let app = build_router(state, &config.server);

    let addr = config.server.bind_address();
    info!("Binding to {addr}");
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    info!("Server running on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
