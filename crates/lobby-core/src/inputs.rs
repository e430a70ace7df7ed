//! Input payloads accepted by data-access operations.
//!
//! These are the caller-supplied halves of entities: IDs, timestamps and the
//! author are stamped by the data-access layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Fields for `post_update`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewUpdate {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Fields for `add_comment`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewComment {
    pub user_email: String,
    pub content: String,
}
