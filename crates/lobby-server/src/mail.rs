//! Fire-and-forget mail side effects.
//!
//! Sends run on their own task; the request that triggered them has already
//! answered by the time they finish.

use lobby_core::entities::Update;
use lobby_mail::{Delivery, notify_waitlist};

use crate::state::AppState;

pub fn spawn_welcome(state: &AppState, email: String) {
    let mailer = state.mailer.clone();
    tokio::spawn(async move {
        match mailer.send_welcome(&email).await {
            Ok(Delivery::Sent) => tracing::info!(to = %email, "welcome email sent"),
            Ok(Delivery::Skipped) => {}
            Err(error) => tracing::warn!(%error, to = %email, "welcome email failed"),
        }
    });
}

pub fn spawn_update_notifications(state: &AppState, update: Update) {
    let mailer = state.mailer.clone();
    let service = state.service.clone();
    tokio::spawn(async move {
        let recipients = match service.list_waitlist().await {
            Ok(recipients) => recipients,
            Err(error) => {
                tracing::warn!(%error, "could not load waitlist for notifications");
                return;
            }
        };
        notify_waitlist(mailer.as_ref(), &recipients, &update).await;
    });
}
