//! Handlers shared by `/place_categories` and `/event_categories`.
//!
//! The category kind comes from the `Extension<CategoryKind>` installed by
//! the route module. Categories are returned with their ancestor chain
//! nested under `parent`.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use cityguide_core::category_tree::{CategoryChain, CategoryIndex, CategoryTreeNode};
use cityguide_core::error::CoreError;
use cityguide_core::types::DbId;
use cityguide_db::models::category::{CategoryKind, CreateCategory, UpdateCategory};
use cityguide_db::repositories::CategoryRepo;
use sqlx::SqliteConnection;

use crate::error::{AppError, AppResult, ConstraintResultExt};
use crate::response::MessageResponse;
use crate::state::AppState;

const NAME_TAKEN: &str = "Category name already exists.";
const UNKNOWN_PARENT: &str = "Integrity error: parent_id does not reference an existing category.";

fn not_found(kind: CategoryKind, id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: kind.entity_name(),
        id,
    })
}

/// Load the index and render one category's chain.
async fn load_chain(
    conn: &mut SqliteConnection,
    kind: CategoryKind,
    id: DbId,
) -> AppResult<CategoryChain> {
    let index = CategoryRepo::load_index(conn, kind).await?;
    index.chain(id).ok_or_else(|| not_found(kind, id))
}

/// GET /api/{kind}_categories
pub async fn list(
    State(state): State<AppState>,
    Extension(kind): Extension<CategoryKind>,
) -> AppResult<Json<Vec<CategoryChain>>> {
    let mut conn = state.pool.acquire().await?;
    let categories = CategoryRepo::list(&mut conn, kind).await?;
    let index = CategoryIndex::new(categories.iter().cloned().map(Into::into));

    let chains = categories
        .iter()
        .filter_map(|c| index.chain(c.id))
        .collect();
    Ok(Json(chains))
}

/// GET /api/{kind}_categories/basic
pub async fn list_roots(
    State(state): State<AppState>,
    Extension(kind): Extension<CategoryKind>,
) -> AppResult<Json<Vec<CategoryChain>>> {
    let mut conn = state.pool.acquire().await?;
    let roots = CategoryRepo::list_roots(&mut conn, kind).await?;

    let chains = roots
        .into_iter()
        .map(|c| CategoryChain {
            id: c.id,
            name: c.name,
            parent_id: c.parent_id,
            parent: None,
        })
        .collect();
    Ok(Json(chains))
}

/// GET /api/{kind}_categories/tree
pub async fn tree(
    State(state): State<AppState>,
    Extension(kind): Extension<CategoryKind>,
) -> AppResult<Json<Vec<CategoryTreeNode>>> {
    let mut conn = state.pool.acquire().await?;
    let index = CategoryRepo::load_index(&mut conn, kind).await?;
    Ok(Json(index.tree()))
}

/// GET /api/{kind}_categories/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Extension(kind): Extension<CategoryKind>,
    Path(id): Path<DbId>,
) -> AppResult<Json<CategoryChain>> {
    let mut conn = state.pool.acquire().await?;
    let chain = load_chain(&mut conn, kind, id).await?;
    Ok(Json(chain))
}

/// POST /api/{kind}_categories
pub async fn create(
    State(state): State<AppState>,
    Extension(kind): Extension<CategoryKind>,
    body: Result<Json<CreateCategory>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CategoryChain>)> {
    let Json(input) = body?;
    let input = input.validate()?;

    let mut tx = state.pool.begin().await?;
    let category = CategoryRepo::create(&mut tx, kind, &input)
        .await
        .on_integrity(NAME_TAKEN, UNKNOWN_PARENT)?;
    let chain = load_chain(&mut tx, kind, category.id).await?;
    tx.commit().await?;

    tracing::info!(
        category_id = category.id,
        kind = kind.table(),
        name = %category.name,
        "Category created"
    );
    Ok((StatusCode::CREATED, Json(chain)))
}

/// PUT /api/{kind}_categories/{id}
///
/// A new `parent_id` that would make the category its own ancestor is
/// rejected with 400.
pub async fn update(
    State(state): State<AppState>,
    Extension(kind): Extension<CategoryKind>,
    Path(id): Path<DbId>,
    body: Result<Json<UpdateCategory>, JsonRejection>,
) -> AppResult<Json<CategoryChain>> {
    let Json(input) = body?;

    let mut tx = state.pool.begin().await?;
    if let Some(parent_id) = input.parent_id {
        let index = CategoryRepo::load_index(&mut tx, kind).await?;
        if index.get(id).is_none() {
            return Err(not_found(kind, id));
        }
        if index.would_create_cycle(id, parent_id) {
            return Err(CoreError::Validation(
                "A category cannot be its own ancestor.".to_string(),
            )
            .into());
        }
    }

    CategoryRepo::update(&mut tx, kind, id, &input)
        .await
        .on_integrity(NAME_TAKEN, UNKNOWN_PARENT)?
        .ok_or_else(|| not_found(kind, id))?;
    let chain = load_chain(&mut tx, kind, id).await?;
    tx.commit().await?;

    tracing::info!(category_id = id, kind = kind.table(), "Category updated");
    Ok(Json(chain))
}

/// DELETE /api/{kind}_categories/{id}
pub async fn delete(
    State(state): State<AppState>,
    Extension(kind): Extension<CategoryKind>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let in_use = format!(
        "Cannot delete category due to existing related {} or sub-categories. \
         Reassign them first.",
        kind.dependents()
    );

    let mut tx = state.pool.begin().await?;
    let deleted = CategoryRepo::delete(&mut tx, kind, id)
        .await
        .on_dependents(&in_use)?;
    if !deleted {
        return Err(not_found(kind, id));
    }
    tx.commit().await?;

    tracing::info!(category_id = id, kind = kind.table(), "Category deleted");
    Ok(Json(MessageResponse::new(format!(
        "{} {id} deleted successfully.",
        kind.entity_name()
    ))))
}
