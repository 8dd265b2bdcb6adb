use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

use crate::models::tags::TagList;

/// A persisted ticket row. Rows with `deleted_at` set are soft-deleted and never
/// returned by reads.
#[derive(Debug, Clone, FromRow)]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub event_time: DateTime<Utc>,
    pub location: String,
    pub image_path: String,
    pub tags: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Client-facing projection of a [`Ticket`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub event_time: DateTime<Utc>,
    pub location: String,
    pub image_path: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Ticket> for TicketResponse {
    fn from(ticket: Ticket) -> Self {
        Self {
            id: ticket.id,
            title: ticket.title,
            description: ticket.description,
            event_time: ticket.event_time,
            location: ticket.location,
            image_path: ticket.image_path,
            tags: ticket.tags.0,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
        }
    }
}

/// Body of `POST /api/tickets`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicket {
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub event_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_path: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: TagList,
}

impl CreateTicket {
    pub fn validate(&self) -> Result<(), String> {
        validate_title(&self.title)
    }
}

/// Body of `PUT`/`PATCH /api/tickets/:id`. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTicket {
    pub title: Option<String>,
    pub description: Option<String>,
    pub event_time: Option<DateTime<Utc>>,
    pub location: Option<String>,
    pub image_path: Option<String>,
    pub tags: Option<TagList>,
}

impl UpdateTicket {
    pub fn validate(&self) -> Result<(), String> {
        match &self.title {
            Some(title) => validate_title(title),
            None => Ok(()),
        }
    }

    /// Applies every provided field onto `ticket`.
    pub fn apply_to(self, ticket: &mut Ticket) {
        if let Some(title) = self.title {
            ticket.title = title;
        }
        if let Some(description) = self.description {
            ticket.description = description;
        }
        if let Some(event_time) = self.event_time {
            ticket.event_time = event_time;
        }
        if let Some(location) = self.location {
            ticket.location = location;
        }
        if let Some(image_path) = self.image_path {
            ticket.image_path = image_path;
        }
        if let Some(tags) = self.tags {
            ticket.tags = Json(tags.into_inner());
        }
    }
}

/// Treats an explicit `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        Err("title must not be empty".to_string())
    } else {
        Ok(())
    }
}
