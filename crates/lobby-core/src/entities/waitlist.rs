use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An interested visitor. `email` is stored trimmed and lowercased and is unique.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub id: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
    pub feedback: Option<String>,
    pub feedback_at: Option<DateTime<Utc>>,
}
