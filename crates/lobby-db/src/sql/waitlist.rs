//! Waitlist repository.

use chrono::{DateTime, Utc};
use libsql::Connection;
use lobby_core::entities::WaitlistEntry;

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, id_clash_or, is_unique_violation_on, parse_datetime,
    parse_optional_datetime,
};

const COLUMNS: &str = "id, email, joined_at, feedback, feedback_at";

fn row_to_entry(row: &libsql::Row) -> Result<WaitlistEntry, DatabaseError> {
    Ok(WaitlistEntry {
        id: row.get::<String>(0)?,
        email: row.get::<String>(1)?,
        joined_at: parse_datetime(&row.get::<String>(2)?)?,
        feedback: get_opt_string(row, 3)?,
        feedback_at: parse_optional_datetime(get_opt_string(row, 4)?.as_deref())?,
    })
}

pub(super) async fn insert(conn: &Connection, entry: &WaitlistEntry) -> Result<(), DatabaseError> {
    let result = conn
        .execute(
            "INSERT INTO waitlist (id, email, joined_at, feedback, feedback_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            libsql::params![
                entry.id.as_str(),
                entry.email.as_str(),
                format_timestamp(&entry.joined_at),
                entry.feedback.as_deref(),
                entry.feedback_at.as_ref().map(format_timestamp)
            ],
        )
        .await;
    match result {
        Ok(_) => Ok(()),
        Err(e) if is_unique_violation_on(&e, "waitlist.email") => {
            Err(DatabaseError::Conflict(entry.email.clone()))
        }
        Err(e) => Err(id_clash_or(e, "waitlist", &entry.id)),
    }
}

pub(super) async fn find_by_email(
    conn: &Connection,
    email: &str,
) -> Result<Option<WaitlistEntry>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {COLUMNS} FROM waitlist WHERE email = ?1"),
            [email],
        )
        .await?;
    rows.next().await?.map(|row| row_to_entry(&row)).transpose()
}

pub(super) async fn get(conn: &Connection, id: &str) -> Result<Option<WaitlistEntry>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {COLUMNS} FROM waitlist WHERE id = ?1"), [id])
        .await?;
    rows.next().await?.map(|row| row_to_entry(&row)).transpose()
}

pub(super) async fn list(conn: &Connection) -> Result<Vec<WaitlistEntry>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {COLUMNS} FROM waitlist ORDER BY joined_at DESC, rowid DESC"),
            (),
        )
        .await?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push(row_to_entry(&row)?);
    }
    Ok(entries)
}

pub(super) async fn set_feedback(
    conn: &Connection,
    id: &str,
    feedback: &str,
    at: DateTime<Utc>,
) -> Result<bool, DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE waitlist SET feedback = ?1, feedback_at = ?2 WHERE id = ?3",
            libsql::params![feedback, format_timestamp(&at), id],
        )
        .await?;
    Ok(changed > 0)
}

pub(super) async fn delete(conn: &Connection, id: &str) -> Result<bool, DatabaseError> {
    let changed = conn
        .execute("DELETE FROM waitlist WHERE id = ?1", [id])
        .await?;
    Ok(changed > 0)
}
