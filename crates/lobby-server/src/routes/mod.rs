//! REST handlers, grouped by resource.

pub mod admin;
pub mod comments;
pub mod updates;
pub mod waitlist;

pub async fn healthz_handler() -> &'static str {
    "ok"
}
