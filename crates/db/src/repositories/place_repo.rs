//! Repository for the `places` table.

use cityguide_core::listing::{fold_for_search, ListingFilter, PageRequest};
use cityguide_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::place::{NewPlace, Place, UpdatePlace};
use crate::repositories::listing::{build_listing_clause, ListingColumns};

/// Select list and join shared by every place read.
const SELECT_PLACE: &str = "\
    SELECT p.id, p.name, p.description, p.position, p.address, p.image_url, \
           p.category_id, c.name AS category_name, c.parent_id AS category_parent_id \
    FROM places p \
    JOIN place_categories c ON c.id = p.category_id";

const LISTING_COLUMNS: ListingColumns = ListingColumns {
    name: "p.name_search",
    description: "p.description_search",
    category_name: "c.name",
};

/// Provides CRUD and listing operations for places.
pub struct PlaceRepo;

impl PlaceRepo {
    /// Find a place (with its category) by ID.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Place>, sqlx::Error> {
        let query = format!("{SELECT_PLACE} WHERE p.id = $1");
        sqlx::query_as::<_, Place>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Whether a place with this ID exists.
    pub async fn exists(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM places WHERE id = $1)")
            .bind(id)
            .fetch_one(conn)
            .await
    }

    /// Insert a place, returning its generated ID.
    pub async fn create(conn: &mut SqliteConnection, input: &NewPlace) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO places \
                (name, description, position, address, image_url, category_id, \
                 name_search, description_search) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.position.as_deref())
        .bind(input.address.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.category_id)
        .bind(fold_for_search(&input.name))
        .bind(fold_for_search(input.description.as_deref().unwrap_or_default()))
        .fetch_one(conn)
        .await
    }

    /// Apply a partial update. Returns `false` if the place does not exist.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: DbId,
        input: &UpdatePlace,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE places SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                position = COALESCE($4, position), \
                address = COALESCE($5, address), \
                image_url = COALESCE($6, image_url), \
                category_id = COALESCE($7, category_id), \
                name_search = COALESCE($8, name_search), \
                description_search = COALESCE($9, description_search) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.description.as_deref())
        .bind(input.position.as_deref())
        .bind(input.address.as_deref())
        .bind(input.image_url.as_deref())
        .bind(input.category_id)
        .bind(input.name.as_deref().map(fold_for_search))
        .bind(input.description.as_deref().map(fold_for_search))
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete a place by ID. Returns `true` if a row was deleted.
    ///
    /// Fails with a foreign-key violation while events still reference it.
    pub async fn delete(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM places WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of places matching `filter`, in primary-key order.
    pub async fn search(
        conn: &mut SqliteConnection,
        filter: &ListingFilter,
        page: &PageRequest,
    ) -> Result<Vec<Place>, sqlx::Error> {
        let clause = build_listing_clause(filter, &LISTING_COLUMNS);
        let query = format!(
            "{SELECT_PLACE} {where_clause} ORDER BY p.id LIMIT ${limit_idx} OFFSET ${offset_idx}",
            where_clause = clause.where_clause,
            limit_idx = clause.next_idx,
            offset_idx = clause.next_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Place>(&query);
        for value in &clause.binds {
            q = q.bind(value);
        }
        q.bind(page.per_page())
            .bind(page.offset())
            .fetch_all(conn)
            .await
    }

    /// Number of places matching `filter`, ignoring pagination.
    pub async fn count(
        conn: &mut SqliteConnection,
        filter: &ListingFilter,
    ) -> Result<i64, sqlx::Error> {
        let clause = build_listing_clause(filter, &LISTING_COLUMNS);
        let query = format!(
            "SELECT COUNT(*) FROM places p \
             JOIN place_categories c ON c.id = p.category_id \
             {}",
            clause.where_clause
        );

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &clause.binds {
            q = q.bind(value);
        }
        q.fetch_one(conn).await
    }
}
