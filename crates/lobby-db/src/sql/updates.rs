//! Update repository. Comments are loaded alongside their parent.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use libsql::Connection;
use lobby_core::entities::{Comment, Update};

use super::comments;
use crate::error::DatabaseError;
use crate::helpers::{
    format_timestamp, get_opt_string, id_clash_or, parse_datetime, parse_optional_datetime,
};
use crate::updates::update::UpdatePatch;

const COLUMNS: &str = "id, title, content, image_url, author, created_at, updated_at";

fn row_to_update(row: &libsql::Row) -> Result<Update, DatabaseError> {
    Ok(Update {
        id: row.get::<String>(0)?,
        title: row.get::<String>(1)?,
        content: row.get::<String>(2)?,
        image_url: get_opt_string(row, 3)?,
        author: row.get::<String>(4)?,
        created_at: parse_datetime(&row.get::<String>(5)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 6)?.as_deref())?,
        comments: Vec::new(),
    })
}

pub(super) async fn insert(conn: &Connection, update: &Update) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO updates (id, title, content, image_url, author, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        libsql::params![
            update.id.as_str(),
            update.title.as_str(),
            update.content.as_str(),
            update.image_url.as_deref(),
            update.author.as_str(),
            format_timestamp(&update.created_at),
            update.updated_at.as_ref().map(format_timestamp)
        ],
    )
    .await
    .map_err(|e| id_clash_or(e, "updates", &update.id))?;
    Ok(())
}

pub(super) async fn get(conn: &Connection, id: &str) -> Result<Option<Update>, DatabaseError> {
    let mut rows = conn
        .query(&format!("SELECT {COLUMNS} FROM updates WHERE id = ?1"), [id])
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(None);
    };
    let mut update = row_to_update(&row)?;
    update.comments = comments::list_for_update(conn, id).await?;
    Ok(Some(update))
}

pub(super) async fn list(conn: &Connection) -> Result<Vec<Update>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {COLUMNS} FROM updates ORDER BY created_at DESC, rowid DESC"),
            (),
        )
        .await?;
    let mut updates = Vec::new();
    while let Some(row) = rows.next().await? {
        updates.push(row_to_update(&row)?);
    }

    let mut by_update: HashMap<String, Vec<Comment>> = HashMap::new();
    for comment in comments::list_all(conn).await? {
        by_update
            .entry(comment.update_id.clone())
            .or_default()
            .push(comment);
    }
    for update in &mut updates {
        update.comments = by_update.remove(&update.id).unwrap_or_default();
    }
    Ok(updates)
}

pub(super) async fn patch(
    conn: &Connection,
    id: &str,
    patch: &UpdatePatch,
    at: DateTime<Utc>,
) -> Result<bool, DatabaseError> {
    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    let mut idx = 1;

    if let Some(ref title) = patch.title {
        sets.push(format!("title = ?{idx}"));
        params.push(title.as_str().into());
        idx += 1;
    }
    if let Some(ref content) = patch.content {
        sets.push(format!("content = ?{idx}"));
        params.push(content.as_str().into());
        idx += 1;
    }
    if let Some(ref image_url) = patch.image_url {
        sets.push(format!("image_url = ?{idx}"));
        params.push(image_url.as_deref().into());
        idx += 1;
    }

    sets.push(format!("updated_at = ?{idx}"));
    params.push(format_timestamp(&at).into());
    idx += 1;

    params.push(id.into());
    let sql = format!("UPDATE updates SET {} WHERE id = ?{idx}", sets.join(", "));

    let changed = conn
        .execute(&sql, libsql::params_from_iter(params))
        .await?;
    Ok(changed > 0)
}

pub(super) async fn delete(conn: &Connection, id: &str) -> Result<bool, DatabaseError> {
    // Explicit so remote connections without the foreign_keys pragma still cascade.
    conn.execute("DELETE FROM comments WHERE update_id = ?1", [id])
        .await?;
    let changed = conn
        .execute("DELETE FROM updates WHERE id = ?1", [id])
        .await?;
    Ok(changed > 0)
}
