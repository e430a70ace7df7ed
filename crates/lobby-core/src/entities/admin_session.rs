use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::SessionState;

/// Singleton admin session record. Each login or logout overwrites it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AdminSession {
    pub authenticated: bool,
    pub timestamp: DateTime<Utc>,
}

impl AdminSession {
    #[must_use]
    pub const fn logged_in(at: DateTime<Utc>) -> Self {
        Self {
            authenticated: true,
            timestamp: at,
        }
    }

    #[must_use]
    pub const fn logged_out(at: DateTime<Utc>) -> Self {
        Self {
            authenticated: false,
            timestamp: at,
        }
    }

    #[must_use]
    pub const fn state(&self) -> SessionState {
        if self.authenticated {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }
}
