//! Place model and DTOs.

use cityguide_core::error::CoreError;
use cityguide_core::types::DbId;
use cityguide_core::validation::require_fields;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

use crate::models::category::CategoryRef;

/// A row from `places` joined with its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub category_id: DbId,
    pub category: CategoryRef,
}

impl<'r> FromRow<'r, SqliteRow> for Place {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let category_id: DbId = row.try_get("category_id")?;
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            position: row.try_get("position")?,
            address: row.try_get("address")?,
            image_url: row.try_get("image_url")?,
            category_id,
            category: CategoryRef {
                id: category_id,
                name: row.try_get("category_name")?,
                parent_id: row.try_get("category_parent_id")?,
            },
        })
    }
}

/// Request body for creating a place.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePlace {
    pub name: Option<String>,
    pub description: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<DbId>,
}

/// A validated place insert.
#[derive(Debug, Clone)]
pub struct NewPlace {
    pub name: String,
    pub description: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub category_id: DbId,
}

impl CreatePlace {
    /// Check that `name` and `category_id` are present.
    pub fn validate(self) -> Result<NewPlace, CoreError> {
        require_fields(&[
            ("name", self.name.is_some()),
            ("category_id", self.category_id.is_some()),
        ])?;
        Ok(NewPlace {
            name: self.name.unwrap_or_default(),
            description: self.description,
            position: self.position,
            address: self.address,
            image_url: self.image_url,
            category_id: self.category_id.unwrap_or_default(),
        })
    }
}

/// Request body for a partial place update. Absent fields keep their value.
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePlace {
    pub name: Option<String>,
    pub description: Option<String>,
    pub position: Option<String>,
    pub address: Option<String>,
    pub image_url: Option<String>,
    pub category_id: Option<DbId>,
}
