//! Ticket queries. Every read filters out soft-deleted rows.

use chrono::Utc;
use sqlx::types::Json;
use sqlx::SqlitePool;

use crate::models::{CreateTicket, Ticket};

// `RETURNING` statements are drained with `fetch_all`: SQLite only commits the write
// once the statement has run to completion, and other pooled connections must see it.

const TICKET_COLUMNS: &str = "id, title, description, event_time, location, image_path, tags, \
                              created_at, updated_at, deleted_at";

pub async fn list(pool: &SqlitePool) -> Result<Vec<Ticket>, sqlx::Error> {
    let sql = format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE deleted_at IS NULL ORDER BY id");
    sqlx::query_as::<_, Ticket>(&sql).fetch_all(pool).await
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Ticket>, sqlx::Error> {
    let sql =
        format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE id = ? AND deleted_at IS NULL");
    let mut rows = sqlx::query_as::<_, Ticket>(&sql)
        .bind(id)
        .fetch_all(pool)
        .await?;
    Ok(rows.pop())
}

pub async fn insert(pool: &SqlitePool, new_ticket: CreateTicket) -> Result<Ticket, sqlx::Error> {
    let now = Utc::now();
    let sql = format!(
        "INSERT INTO tickets \
         (title, description, event_time, location, image_path, tags, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?) \
         RETURNING {TICKET_COLUMNS}"
    );

    let mut rows = sqlx::query_as::<_, Ticket>(&sql)
        .bind(new_ticket.title)
        .bind(new_ticket.description)
        .bind(new_ticket.event_time)
        .bind(new_ticket.location)
        .bind(new_ticket.image_path)
        .bind(Json(new_ticket.tags.into_inner()))
        .bind(now)
        .bind(now)
        .fetch_all(pool)
        .await?;
    rows.pop().ok_or(sqlx::Error::RowNotFound)
}

/// Writes every mutable column of `ticket` and refreshes `updated_at`.
///
/// Returns `None` if the row was deleted (or never existed) by the time the write ran.
pub async fn save(pool: &SqlitePool, ticket: &Ticket) -> Result<Option<Ticket>, sqlx::Error> {
    let sql = format!(
        "UPDATE tickets SET \
         title = ?, description = ?, event_time = ?, location = ?, image_path = ?, tags = ?, \
         updated_at = ? \
         WHERE id = ? AND deleted_at IS NULL \
         RETURNING {TICKET_COLUMNS}"
    );

    let mut rows = sqlx::query_as::<_, Ticket>(&sql)
        .bind(&ticket.title)
        .bind(&ticket.description)
        .bind(ticket.event_time)
        .bind(&ticket.location)
        .bind(&ticket.image_path)
        .bind(&ticket.tags)
        .bind(Utc::now())
        .bind(ticket.id)
        .fetch_all(pool)
        .await?;
    Ok(rows.pop())
}

/// Marks the ticket deleted. Returns `false` if there was no live ticket with `id`.
pub async fn soft_delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let now = Utc::now();
    let result = sqlx::query(
        "UPDATE tickets SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
