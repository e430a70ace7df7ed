//! Entity structs for all Lobby domain objects.
//!
//! Each entity maps to a table in the libSQL schema (`lobby-db/migrations`) and to
//! a document in the in-memory store. All structs derive `Serialize`,
//! `Deserialize`, and `JsonSchema` for the REST surface and schema export.

mod admin_session;
mod comment;
mod update;
mod waitlist;

pub use admin_session::AdminSession;
pub use comment::Comment;
pub use update::{ADMIN_AUTHOR, Update};
pub use waitlist::WaitlistEntry;
