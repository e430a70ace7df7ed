//! # lobby-core
//!
//! Core types, ID generation, and error types for Lobby.
//!
//! This crate provides the foundational types shared across all Lobby crates:
//! - Entity structs for the domain (waitlist entries, updates, comments, admin session)
//! - Input payloads accepted by the data-access layer
//! - Session state, entity type and backend selector enums
//! - ID prefix constants and generation
//! - The cross-cutting error taxonomy
//! - Email and required-field validation
//! - Realtime channel wire events

pub mod entities;
pub mod enums;
pub mod errors;
pub mod events;
pub mod ids;
pub mod inputs;
pub mod validation;
