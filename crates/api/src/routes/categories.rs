//! Route definitions shared by `/place_categories` and `/event_categories`.

use axum::routing::get;
use axum::{Extension, Router};
use cityguide_db::models::category::CategoryKind;

use crate::handlers::category;
use crate::state::AppState;

/// Routes for one category kind. The kind reaches handlers as an
/// `Extension<CategoryKind>`.
///
/// ```text
/// GET    /               -> list
/// POST   /               -> create
/// GET    /basic          -> list_roots
/// GET    /tree           -> tree
/// GET    /{id}           -> get_by_id
/// PUT    /{id}           -> update
/// DELETE /{id}           -> delete
/// ```
pub fn router(kind: CategoryKind) -> Router<AppState> {
    Router::new()
        .route("/", get(category::list).post(category::create))
        .route("/basic", get(category::list_roots))
        .route("/tree", get(category::tree))
        .route(
            "/{id}",
            get(category::get_by_id)
                .put(category::update)
                .delete(category::delete),
        )
        .layer(Extension(kind))
}
