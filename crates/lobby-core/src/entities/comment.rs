use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A visitor reply to an update, optionally annotated with one admin reply.
///
/// `update_id` is a back-reference; the parent update owns the comment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Comment {
    pub id: String,
    pub update_id: String,
    pub user_email: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub admin_reply: Option<String>,
    pub admin_reply_at: Option<DateTime<Utc>>,
}
