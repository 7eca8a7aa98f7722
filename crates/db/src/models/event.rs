//! Event model and DTOs.
//!
//! `datetime` arrives as an ISO-8601 string and is parsed before anything is
//! written, so a malformed value never reaches the database.

use cityguide_core::datetime::parse_event_datetime;
use cityguide_core::error::CoreError;
use cityguide_core::types::{DbId, EventDateTime};
use cityguide_core::validation::require_fields;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::models::category::CategoryRef;

/// A row from `events` joined with its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub datetime: Option<EventDateTime>,
    pub image_url: Option<String>,
    pub place_id: DbId,
    pub category_id: DbId,
    pub category: CategoryRef,
}

impl<'r> FromRow<'r, SqliteRow> for Event {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let category_id: DbId = row.try_get("category_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            datetime: row.try_get("datetime")?,
            image_url: row.try_get("image_url")?,
            place_id: row.try_get("place_id")?,
            category_id,
            category: CategoryRef {
                id: category_id,
                name: row.try_get("category_name")?,
                parent_id: row.try_get("category_parent_id")?,
            },
        })
    }
}

/// An event as shown in listings: the event plus its place's `position`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventListItem {
    #[serde(flatten)]
    pub event: Event,
    pub position: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for EventListItem {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            event: Event::from_row(row)?,
            position: row.try_get("place_position")?,
        })
    }
}

/// Request body for creating an event.
#[derive(Debug, Default, Deserialize)]
pub struct CreateEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub datetime: Option<String>,
    pub image_url: Option<String>,
    pub place_id: Option<DbId>,
    pub category_id: Option<DbId>,
}

/// A validated event insert.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub description: Option<String>,
    pub datetime: EventDateTime,
    pub image_url: Option<String>,
    pub place_id: DbId,
    pub category_id: DbId,
}

impl CreateEvent {
    /// Check required fields, then parse `datetime`.
    pub fn validate(self) -> Result<NewEvent, CoreError> {
        require_fields(&[
            ("name", self.name.is_some()),
            ("datetime", self.datetime.is_some()),
            ("place_id", self.place_id.is_some()),
            ("category_id", self.category_id.is_some()),
        ])?;
        let datetime = parse_event_datetime(self.datetime.as_deref().unwrap_or_default())?;

        Ok(NewEvent {
            name: self.name.unwrap_or_default(),
            description: self.description,
            datetime,
            image_url: self.image_url,
            place_id: self.place_id.unwrap_or_default(),
            category_id: self.category_id.unwrap_or_default(),
        })
    }
}

/// Request body for a partial event update. Absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub description: Option<String>,
    pub datetime: Option<String>,
    pub image_url: Option<String>,
    pub place_id: Option<DbId>,
    pub category_id: Option<DbId>,
}

/// A parsed partial update, ready for the repository.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub datetime: Option<EventDateTime>,
    pub image_url: Option<String>,
    pub place_id: Option<DbId>,
    pub category_id: Option<DbId>,
}

impl UpdateEvent {
    pub fn validate(self) -> Result<EventChanges, CoreError> {
        let datetime = self
            .datetime
            .as_deref()
            .map(parse_event_datetime)
            .transpose()?;

        Ok(EventChanges {
            name: self.name,
            description: self.description,
            datetime,
            image_url: self.image_url,
            place_id: self.place_id,
            category_id: self.category_id,
        })
    }
}
