//! Singleton admin session row.

use libsql::Connection;
use lobby_core::entities::AdminSession;

use crate::error::DatabaseError;
use crate::helpers::{format_timestamp, parse_datetime};

pub(super) async fn load(conn: &Connection) -> Result<Option<AdminSession>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT authenticated, timestamp FROM admin_sessions WHERE id = 'current'",
            (),
        )
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(None);
    };
    Ok(Some(AdminSession {
        authenticated: row.get::<i64>(0)? != 0,
        timestamp: parse_datetime(&row.get::<String>(1)?)?,
    }))
}

pub(super) async fn save(conn: &Connection, session: &AdminSession) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO admin_sessions (id, authenticated, timestamp) VALUES ('current', ?1, ?2)
         ON CONFLICT(id) DO UPDATE SET authenticated = excluded.authenticated, timestamp = excluded.timestamp",
        libsql::params![i64::from(session.authenticated), format_timestamp(&session.timestamp)],
    )
    .await?;
    Ok(())
}
