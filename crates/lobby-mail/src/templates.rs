//! Template parameter sets.
//!
//! Field names match the variables referenced by the EmailJS templates.

use lobby_core::entities::Update;
use serde::Serialize;

pub const WELCOME_SUBJECT: &str = "Welcome to Lobby!";
pub const UPDATE_SUBJECT: &str = "New Update from Lobby!";

const WELCOME_MESSAGE: &str = "Thank you for joining our waitlist!\n\n\
We're excited to have you on board and will keep you updated on our progress. \
You'll be among the first to know when we launch.\n\n\
Feel free to check our website for regular updates and leave comments on our posts.";

/// Greeting name: the local part of the address.
#[must_use]
pub fn recipient_name(email: &str) -> &str {
    email.split('@').next().unwrap_or(email)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeParams {
    pub to_email: String,
    pub user_email: String,
    pub to_name: String,
    pub from_name: String,
    pub subject: String,
    pub message: String,
    pub website_url: String,
}

impl WelcomeParams {
    #[must_use]
    pub fn new(email: &str, from_name: &str, website_url: &str) -> Self {
        Self {
            to_email: email.to_string(),
            user_email: email.to_string(),
            to_name: recipient_name(email).to_string(),
            from_name: from_name.to_string(),
            subject: WELCOME_SUBJECT.to_string(),
            message: WELCOME_MESSAGE.to_string(),
            website_url: website_url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateNotificationParams {
    pub to_email: String,
    pub to_name: String,
    pub from_name: String,
    pub subject: String,
    pub update_title: String,
    pub update_content: String,
    pub update_image: String,
    pub update_date: String,
    pub action_url: String,
    pub message: String,
}

impl UpdateNotificationParams {
    #[must_use]
    pub fn new(email: &str, update: &Update, from_name: &str, action_url: &str) -> Self {
        Self {
            to_email: email.to_string(),
            to_name: recipient_name(email).to_string(),
            from_name: from_name.to_string(),
            subject: UPDATE_SUBJECT.to_string(),
            update_title: update.title.clone(),
            update_content: update.content.clone(),
            update_image: update.image_url.clone().unwrap_or_default(),
            update_date: update.created_at.format("%Y-%m-%d").to_string(),
            action_url: action_url.to_string(),
            message: format!(
                "We've just posted a new update that we think you'll be interested in!\n\n{}\n\n{}\n\n\
                 Visit our website to read more and join the discussion.",
                update.title, update.content
            ),
        }
    }
}
