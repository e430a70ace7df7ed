//! Comment repository.

use chrono::{DateTime, Utc};
use libsql::Connection;
use lobby_core::entities::Comment;

use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, id_clash_or, parse_datetime, parse_optional_datetime,
};

const COLUMNS: &str =
    "id, update_id, user_email, content, created_at, admin_reply, admin_reply_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get::<String>(0)?,
        update_id: row.get::<String>(1)?,
        user_email: row.get::<String>(2)?,
        content: row.get::<String>(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        admin_reply: get_opt_string(row, 5)?,
        admin_reply_at: parse_optional_datetime(get_opt_string(row, 6)?.as_deref())?,
    })
}

async fn collect(mut rows: libsql::Rows) -> Result<Vec<Comment>, DatabaseError> {
    let mut comments = Vec::new();
    while let Some(row) = rows.next().await? {
        comments.push(row_to_comment(&row)?);
    }
    Ok(comments)
}

pub(super) async fn list_for_update(
    conn: &Connection,
    update_id: &str,
) -> Result<Vec<Comment>, DatabaseError> {
    let rows = conn
        .query(
            &format!(
                "SELECT {COLUMNS} FROM comments WHERE update_id = ?1 ORDER BY created_at ASC, rowid ASC"
            ),
            [update_id],
        )
        .await?;
    collect(rows).await
}

pub(super) async fn list_all(conn: &Connection) -> Result<Vec<Comment>, DatabaseError> {
    let rows = conn
        .query(
            &format!("SELECT {COLUMNS} FROM comments ORDER BY created_at ASC, rowid ASC"),
            (),
        )
        .await?;
    collect(rows).await
}

/// Insert only when the parent exists, in one statement.
pub(super) async fn insert(conn: &Connection, comment: &Comment) -> Result<bool, DatabaseError> {
    let changed = conn
        .execute(
            "INSERT INTO comments (id, update_id, user_email, content, created_at, admin_reply, admin_reply_at)
             SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
             WHERE EXISTS (SELECT 1 FROM updates WHERE id = ?2)",
            libsql::params![
                comment.id.as_str(),
                comment.update_id.as_str(),
                comment.user_email.as_str(),
                comment.content.as_str(),
                format_timestamp(&comment.created_at),
                comment.admin_reply.as_deref(),
                comment.admin_reply_at.as_ref().map(format_timestamp)
            ],
        )
        .await
        .map_err(|e| id_clash_or(e, "comments", &comment.id))?;
    Ok(changed > 0)
}

pub(super) async fn set_admin_reply(
    conn: &Connection,
    update_id: &str,
    comment_id: &str,
    reply: &str,
    at: DateTime<Utc>,
) -> Result<bool, DatabaseError> {
    let changed = conn
        .execute(
            "UPDATE comments SET admin_reply = ?1, admin_reply_at = ?2
             WHERE id = ?3 AND update_id = ?4",
            libsql::params![reply, format_timestamp(&at), comment_id, update_id],
        )
        .await?;
    Ok(changed > 0)
}

pub(super) async fn delete(
    conn: &Connection,
    update_id: &str,
    comment_id: &str,
) -> Result<bool, DatabaseError> {
    let changed = conn
        .execute(
            "DELETE FROM comments WHERE id = ?1 AND update_id = ?2",
            [comment_id, update_id],
        )
        .await?;
    Ok(changed > 0)
}
