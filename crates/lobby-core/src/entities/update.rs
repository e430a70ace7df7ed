use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::Comment;

/// Author stamped on every update posted through the admin gate.
pub const ADMIN_AUTHOR: &str = "admin";

/// An admin-authored announcement with its comment thread.
///
/// `comments` is ordered by `created_at` ascending.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Update {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub author: String,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

impl Update {
    #[must_use]
    pub fn comment(&self, comment_id: &str) -> Option<&Comment> {
        self.comments.iter().find(|c| c.id == comment_id)
    }
}
