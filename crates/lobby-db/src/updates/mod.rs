//! Update builder types for entity mutations.
//!
//! Each builder produces a patch struct with `Option` fields. Only `Some`
//! fields are written; everything else is left as stored.

pub mod update;
