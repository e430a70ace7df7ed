//! Row-to-entity parsing helpers.
//!
//! Timestamps are written by [`format_timestamp`] and read back by
//! [`parse_datetime`], which also accepts `SQLite`'s `datetime('now')` format
//! for rows written by hand.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::DatabaseError;

/// Current time truncated to the precision stored in TEXT columns.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Format a timestamp for storage. Fixed-width so TEXT ordering is time ordering.
#[must_use]
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Whether a libSQL error is a UNIQUE constraint violation on `column`
/// (qualified, e.g. `waitlist.email`).
#[must_use]
pub fn is_unique_violation_on(e: &libsql::Error, column: &str) -> bool {
    let message = e.to_string();
    message
        .split_once("UNIQUE constraint failed: ")
        .is_some_and(|(_, columns)| columns.split(", ").any(|c| c.trim() == column))
}

/// Map a failed insert into `table`: a clash on `table.id` becomes
/// [`DatabaseError::IdTaken`].
pub fn id_clash_or(e: libsql::Error, table: &str, id: &str) -> DatabaseError {
    if is_unique_violation_on(&e, &format!("{table}.id")) {
        DatabaseError::IdTaken(id.to_string())
    } else {
        e.into()
    }
}
