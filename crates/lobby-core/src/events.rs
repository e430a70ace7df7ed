//! Realtime channel wire events.
//!
//! Every frame is a JSON object `{"event": "<name>", "data": <payload>}` with
//! kebab-case event names.

use serde::{Deserialize, Serialize};

use crate::entities::{Update, WaitlistEntry};
use crate::inputs::NewUpdate;

/// Frames sent by a connected client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join the waitlist with the given email.
    JoinWaitlist(String),
    /// Post an update (requires an authenticated admin session).
    PostUpdate(NewUpdate),
}

/// Frames sent by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Full waitlist snapshot, broadcast on every waitlist change.
    WaitlistUpdated(Vec<WaitlistEntry>),
    /// A newly posted update, broadcast once.
    UpdatePosted(Update),
    /// Full updates snapshot, broadcast on every update or comment change.
    UpdatesUpdated(Vec<Update>),
    /// Failure message, sent only to the client whose frame failed.
    Error(String),
}

impl ServerEvent {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::WaitlistUpdated(_) => "waitlist-updated",
            Self::UpdatePosted(_) => "update-posted",
            Self::UpdatesUpdated(_) => "updates-updated",
            Self::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn client_frames_parse_from_wire() {
        let join: ClientEvent =
            serde_json::from_value(json!({"event": "join-waitlist", "data": "a@test.com"}))
                .unwrap();
        assert_eq!(join, ClientEvent::JoinWaitlist("a@test.com".into()));

        let post: ClientEvent = serde_json::from_value(json!({
            "event": "post-update",
            "data": {"title": "Beta", "content": "Opens Monday"}
        }))
        .unwrap();
        assert_eq!(
            post,
            ClientEvent::PostUpdate(NewUpdate {
                title: "Beta".into(),
                content: "Opens Monday".into(),
                image_url: None,
            })
        );
    }

    #[test]
    fn unknown_client_event_is_rejected() {
        let parsed =
            serde_json::from_value::<ClientEvent>(json!({"event": "drop-table", "data": 1}));
        assert!(parsed.is_err());
    }

    #[test]
    fn server_frame_name_matches_serialized_tag() {
        let events = [
            ServerEvent::WaitlistUpdated(Vec::new()),
            ServerEvent::UpdatesUpdated(Vec::new()),
            ServerEvent::Error("boom".into()),
        ];
        for event in events {
            let value = serde_json::to_value(&event).unwrap();
            assert_eq!(value["event"], event.name());
        }
    }
}
