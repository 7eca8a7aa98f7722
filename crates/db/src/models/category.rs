//! Place and event category models.
//!
//! Both category kinds share one row shape and one repository; the
//! [`CategoryKind`] selects the table.

use cityguide_core::category_tree::CategoryNode;
use cityguide_core::error::CoreError;
use cityguide_core::types::DbId;
use cityguide_core::validation::require_fields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which category tree a request operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Place,
    Event,
}

impl CategoryKind {
    /// Backing table name.
    pub fn table(self) -> &'static str {
        match self {
            Self::Place => "place_categories",
            Self::Event => "event_categories",
        }
    }

    /// Human-readable entity name used in messages.
    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Place => "Place category",
            Self::Event => "Event category",
        }
    }

    /// The rows that may reference a category of this kind.
    pub fn dependents(self) -> &'static str {
        match self {
            Self::Place => "places",
            Self::Event => "events",
        }
    }
}

/// A row from `place_categories` or `event_categories`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
}

impl From<Category> for CategoryNode {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            parent_id: category.parent_id,
        }
    }
}

/// The direct category embedded in a place or event (no ancestor chain).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRef {
    pub id: DbId,
    pub name: String,
    pub parent_id: Option<DbId>,
}

/// Request body for creating a category.
#[derive(Debug, Default, Deserialize)]
pub struct CreateCategory {
    pub name: Option<String>,
    pub parent_id: Option<DbId>,
}

/// A validated category insert.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub parent_id: Option<DbId>,
}

impl CreateCategory {
    pub fn validate(self) -> Result<NewCategory, CoreError> {
        require_fields(&[("name", self.name.is_some())])?;
        Ok(NewCategory {
            name: self.name.unwrap_or_default(),
            parent_id: self.parent_id,
        })
    }
}

/// Request body for updating a category.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub parent_id: Option<DbId>,
}
