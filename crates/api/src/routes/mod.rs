pub mod categories;
pub mod events;
pub mod health;
pub mod places;

use axum::Router;
use cityguide_db::models::category::CategoryKind;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /places                          list (search, paginate), create
/// /places/{id}                     get, update, delete
/// /places/{id}/events              events held at the place
///
/// /events                          list (search, paginate), create
/// /events/{id}                     get, update, delete
/// /events/{id}/place               place of the event
///
/// /place_categories                list all, create
/// /place_categories/basic          root categories
/// /place_categories/tree           nested tree
/// /place_categories/{id}           get, update, delete
///
/// /event_categories/...            same shape as /place_categories
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/places", places::router())
        .nest("/events", events::router())
        .nest("/place_categories", categories::router(CategoryKind::Place))
        .nest("/event_categories", categories::router(CategoryKind::Event))
}
