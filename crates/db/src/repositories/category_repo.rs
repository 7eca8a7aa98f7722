//! Repository for the `place_categories` and `event_categories` tables.

use cityguide_core::category_tree::CategoryIndex;
use cityguide_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::category::{Category, CategoryKind, NewCategory, UpdateCategory};

/// Column list for category queries.
const COLUMNS: &str = "id, name, parent_id";

/// Provides CRUD operations for both category kinds.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories of a kind, ordered by id.
    pub async fn list(
        conn: &mut SqliteConnection,
        kind: CategoryKind,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} ORDER BY id", kind.table());
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(conn)
            .await
    }

    /// List root categories (no parent), ordered by id.
    pub async fn list_roots(
        conn: &mut SqliteConnection,
        kind: CategoryKind,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE parent_id IS NULL ORDER BY id",
            kind.table()
        );
        sqlx::query_as::<_, Category>(&query)
            .fetch_all(conn)
            .await
    }

    /// Load every category of a kind into an index for tree walks.
    pub async fn load_index(
        conn: &mut SqliteConnection,
        kind: CategoryKind,
    ) -> Result<CategoryIndex, sqlx::Error> {
        let categories = Self::list(conn, kind).await?;
        Ok(CategoryIndex::new(categories.into_iter().map(Into::into)))
    }

    /// Find a category by its ID.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        kind: CategoryKind,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", kind.table());
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert a category, returning the created row.
    pub async fn create(
        conn: &mut SqliteConnection,
        kind: CategoryKind,
        input: &NewCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO {} (name, parent_id) VALUES ($1, $2) RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(input.parent_id)
            .fetch_one(conn)
            .await
    }

    /// Update a category by ID. Returns `None` if it does not exist.
    pub async fn update(
        conn: &mut SqliteConnection,
        kind: CategoryKind,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE {} SET \
                name = COALESCE($2, name), \
                parent_id = COALESCE($3, parent_id) \
             WHERE id = $1 \
             RETURNING {COLUMNS}",
            kind.table()
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.parent_id)
            .fetch_optional(conn)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    ///
    /// Fails with a foreign-key violation while sub-categories or
    /// places/events still reference it.
    pub async fn delete(
        conn: &mut SqliteConnection,
        kind: CategoryKind,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(conn).await?;
        Ok(result.rows_affected() > 0)
    }
}
