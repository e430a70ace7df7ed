//! WebSocket channel at `/ws`.
//!
//! Each connection gets the current waitlist and updates snapshots, then
//! every hub event. Client frames are applied through the same service as
//! REST; a failed frame is answered with an `error` event to that client
//! only.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use lobby_core::errors::CoreError;
use lobby_core::events::{ClientEvent, ServerEvent};
use tokio::sync::{broadcast, mpsc};

use crate::error::public_message;
use crate::mail::{spawn_update_notifications, spawn_welcome};
use crate::state::AppState;

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| client_session(socket, state))
}

async fn client_session(socket: WebSocket, state: AppState) {
    let (mut sink, mut stream) = socket.split();
    let mut events = state.hub.subscribe();
    let (direct_tx, mut direct_rx) = mpsc::unbounded_channel::<ServerEvent>();

    for event in initial_snapshots(&state).await {
        let _ = direct_tx.send(event);
    }

    let mut writer = tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                received = events.recv() => match received {
                    Ok(event) => event,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "socket lagged behind hub");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                },
                direct = direct_rx.recv() => match direct {
                    Some(event) => event,
                    None => break,
                },
            };
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(error) => {
                    tracing::error!(%error, event = event.name(), "failed to encode event");
                    continue;
                }
            };
            if sink.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            frame = stream.next() => match frame {
                Some(Ok(Message::Text(text))) => {
                    if let Some(reply) = handle_frame(&state, text.as_str()).await {
                        let _ = direct_tx.send(reply);
                    }
                }
                Some(Ok(Message::Close(_)) | Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
            _ = &mut writer => break,
        }
    }
    writer.abort();
    tracing::debug!("socket closed");
}

async fn initial_snapshots(state: &AppState) -> Vec<ServerEvent> {
    let mut events = Vec::with_capacity(2);
    match state.service.list_waitlist().await {
        Ok(entries) => events.push(ServerEvent::WaitlistUpdated(entries)),
        Err(error) => tracing::warn!(%error, "initial waitlist snapshot failed"),
    }
    match state.service.list_updates().await {
        Ok(updates) => events.push(ServerEvent::UpdatesUpdated(updates)),
        Err(error) => tracing::warn!(%error, "initial updates snapshot failed"),
    }
    events
}

/// Parse and apply one client frame. Returns the reply for this client, if any.
pub async fn handle_frame(state: &AppState, text: &str) -> Option<ServerEvent> {
    let event: ClientEvent = match serde_json::from_str(text) {
        Ok(event) => event,
        Err(error) => {
            tracing::debug!(%error, "malformed client frame");
            return Some(ServerEvent::Error(format!("Malformed event: {error}")));
        }
    };
    apply_client_event(state, event)
        .await
        .err()
        .map(|error| ServerEvent::Error(public_message(&error)))
}

/// Run a client event against the service. Broadcasts happen here or
/// through the service change feed.
pub async fn apply_client_event(state: &AppState, event: ClientEvent) -> Result<(), CoreError> {
    match event {
        ClientEvent::JoinWaitlist(email) => {
            let entry = state.service.join_waitlist(&email).await?;
            spawn_welcome(state, entry.email);
        }
        ClientEvent::PostUpdate(new) => {
            let update = state.service.post_update(&new).await?;
            state.broadcast(ServerEvent::UpdatePosted(update.clone()));
            spawn_update_notifications(state, update);
        }
    }
    Ok(())
}
