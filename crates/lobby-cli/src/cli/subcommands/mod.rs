mod admin;
mod comment;
mod update;
mod waitlist;

pub use admin::{AdminCommands, AdminHashArgs, AdminLoginArgs};
pub use comment::{CommentAddArgs, CommentCommands, CommentDeleteArgs, CommentReplyArgs};
pub use update::{UpdateCommands, UpdateEditArgs, UpdatePostArgs};
pub use waitlist::{WaitlistCommands, WaitlistFeedbackArgs};
