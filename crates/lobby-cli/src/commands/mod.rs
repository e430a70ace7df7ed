pub mod admin;
pub mod comment;
pub mod dispatch;
pub mod schema;
pub mod seed;
pub mod serve;
pub mod update;
pub mod waitlist;

use serde::Serialize;

/// Acknowledgement printed by delete commands.
#[derive(Debug, Serialize)]
pub struct Deleted<'a> {
    pub deleted: &'a str,
}
