//! Fan-out of an update announcement to the whole waitlist.

use lobby_core::entities::{Update, WaitlistEntry};

use crate::mailer::{Delivery, Mailer};

/// Per-run delivery counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotifySummary {
    pub sent: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl NotifySummary {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.sent + self.skipped + self.failed
    }
}

/// Send `update` to every entry, one at a time. Individual failures are
/// logged and counted; they never stop the run.
pub async fn notify_waitlist(
    mailer: &dyn Mailer,
    recipients: &[WaitlistEntry],
    update: &Update,
) -> NotifySummary {
    let mut summary = NotifySummary::default();
    for entry in recipients {
        match mailer.send_update_notification(&entry.email, update).await {
            Ok(Delivery::Sent) => summary.sent += 1,
            Ok(Delivery::Skipped) => summary.skipped += 1,
            Err(error) => {
                tracing::warn!(%error, to = %entry.email, "update notification failed");
                summary.failed += 1;
            }
        }
    }
    tracing::info!(
        update_id = %update.id,
        sent = summary.sent,
        skipped = summary.skipped,
        failed = summary.failed,
        "update notifications finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailError;
    use async_trait::async_trait;
    use chrono::Utc;

    /// Fails for any address starting with `bad`.
    struct Flaky;

    #[async_trait]
    impl Mailer for Flaky {
        async fn send_welcome(&self, _email: &str) -> Result<Delivery, MailError> {
            Ok(Delivery::Sent)
        }

        async fn send_update_notification(
            &self,
            email: &str,
            _update: &Update,
        ) -> Result<Delivery, MailError> {
            if email.starts_with("bad") {
                Err(MailError::Api {
                    status: 400,
                    message: "rejected".into(),
                })
            } else {
                Ok(Delivery::Sent)
            }
        }
    }

    fn entry(email: &str) -> WaitlistEntry {
        WaitlistEntry {
            id: format!("wl-{email}"),
            email: email.into(),
            joined_at: Utc::now(),
            feedback: None,
            feedback_at: None,
        }
    }

    fn update() -> Update {
        Update {
            id: "upd-00000001".into(),
            title: "t".into(),
            content: "c".into(),
            image_url: None,
            created_at: Utc::now(),
            updated_at: None,
            author: "admin".into(),
            comments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn failures_are_counted_not_fatal() {
        let recipients = [entry("a@test.com"), entry("bad@test.com"), entry("c@test.com")];
        let summary = notify_waitlist(&Flaky, &recipients, &update()).await;
        assert_eq!(
            summary,
            NotifySummary {
                sent: 2,
                skipped: 0,
                failed: 1
            }
        );
        assert_eq!(summary.total(), 3);
    }

    #[tokio::test]
    async fn noop_skips_everyone() {
        let recipients = [entry("a@test.com")];
        let summary = notify_waitlist(&crate::NoopMailer, &recipients, &update()).await;
        assert_eq!(summary.skipped, 1);
    }
}
