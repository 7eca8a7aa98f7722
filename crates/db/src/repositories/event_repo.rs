//! Repository for the `events` table.

use cityguide_core::listing::{fold_for_search, ListingFilter, PageRequest};
use cityguide_core::types::DbId;
use sqlx::SqliteConnection;

use crate::models::event::{Event, EventChanges, EventListItem, NewEvent};
use crate::repositories::listing::{build_listing_clause, ListingColumns};

/// Select list and joins shared by every event read. The place join is
/// outer so an event whose place row is missing still lists.
const SELECT_EVENT: &str = "\
    SELECT e.id, e.name, e.description, e.datetime, e.image_url, e.place_id, \
           e.category_id, c.name AS category_name, c.parent_id AS category_parent_id, \
           pl.position AS place_position \
    FROM events e \
    JOIN event_categories c ON c.id = e.category_id \
    LEFT JOIN places pl ON pl.id = e.place_id";

const LISTING_COLUMNS: ListingColumns = ListingColumns {
    name: "e.name_search",
    description: "e.description_search",
    category_name: "c.name",
};

/// Provides CRUD and listing operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Find an event (with its category) by ID.
    pub async fn find_by_id(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("{SELECT_EVENT} WHERE e.id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Insert an event, returning its generated ID.
    pub async fn create(conn: &mut SqliteConnection, input: &NewEvent) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO events \
                (name, description, datetime, image_url, place_id, category_id, \
                 name_search, description_search) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&input.name)
        .bind(input.description.as_deref())
        .bind(input.datetime)
        .bind(input.image_url.as_deref())
        .bind(input.place_id)
        .bind(input.category_id)
        .bind(fold_for_search(&input.name))
        .bind(fold_for_search(input.description.as_deref().unwrap_or_default()))
        .fetch_one(conn)
        .await
    }

    /// Apply a partial update. Returns `false` if the event does not exist.
    pub async fn update(
        conn: &mut SqliteConnection,
        id: DbId,
        input: &EventChanges,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE events SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                datetime = COALESCE($4, datetime), \
                image_url = COALESCE($5, image_url), \
                place_id = COALESCE($6, place_id), \
                category_id = COALESCE($7, category_id), \
                name_search = COALESCE($8, name_search), \
                description_search = COALESCE($9, description_search) \
             WHERE id = $1",
        )
        .bind(id)
        .bind(input.name.as_deref())
        .bind(input.description.as_deref())
        .bind(input.datetime)
        .bind(input.image_url.as_deref())
        .bind(input.place_id)
        .bind(input.category_id)
        .bind(input.name.as_deref().map(fold_for_search))
        .bind(input.description.as_deref().map(fold_for_search))
        .execute(conn)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an event by ID. Returns `true` if a row was deleted.
    pub async fn delete(conn: &mut SqliteConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// One page of events matching `filter`, in primary-key order, each
    /// carrying its place's position.
    pub async fn search(
        conn: &mut SqliteConnection,
        filter: &ListingFilter,
        page: &PageRequest,
    ) -> Result<Vec<EventListItem>, sqlx::Error> {
        let clause = build_listing_clause(filter, &LISTING_COLUMNS);
        let query = format!(
            "{SELECT_EVENT} {where_clause} ORDER BY e.id LIMIT ${limit_idx} OFFSET ${offset_idx}",
            where_clause = clause.where_clause,
            limit_idx = clause.next_idx,
            offset_idx = clause.next_idx + 1,
        );

        let mut q = sqlx::query_as::<_, EventListItem>(&query);
        for value in &clause.binds {
            q = q.bind(value);
        }
        q.bind(page.per_page())
            .bind(page.offset())
            .fetch_all(conn)
            .await
    }

    /// Number of events matching `filter`, ignoring pagination.
    pub async fn count(
        conn: &mut SqliteConnection,
        filter: &ListingFilter,
    ) -> Result<i64, sqlx::Error> {
        let clause = build_listing_clause(filter, &LISTING_COLUMNS);
        let query = format!(
            "SELECT COUNT(*) FROM events e \
             JOIN event_categories c ON c.id = e.category_id \
             {}",
            clause.where_clause
        );

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in &clause.binds {
            q = q.bind(value);
        }
        q.fetch_one(conn).await
    }

    /// All events held at a place, ordered by id.
    pub async fn list_by_place(
        conn: &mut SqliteConnection,
        place_id: DbId,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!("{SELECT_EVENT} WHERE e.place_id = $1 ORDER BY e.id");
        sqlx::query_as::<_, Event>(&query)
            .bind(place_id)
            .fetch_all(conn)
            .await
    }
}
