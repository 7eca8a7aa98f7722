//! Handlers for the `/places` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cityguide_core::error::CoreError;
use cityguide_core::types::DbId;
use cityguide_db::models::event::Event;
use cityguide_db::models::place::{CreatePlace, Place, UpdatePlace};
use cityguide_db::repositories::{EventRepo, PlaceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult, ConstraintResultExt};
use crate::query::ListingParams;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Place";

const CREATE_INTEGRITY: &str =
    "Integrity error: Check category_id (ID might not exist) or unique constraints.";
const UPDATE_INTEGRITY: &str = "Integrity error: Check category_id or unique constraints.";
const HAS_EVENTS: &str = "Cannot delete place due to existing related events. \
                          Delete related events first.";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// One page of places plus paging metadata.
#[derive(Debug, Serialize)]
pub struct PlaceListResponse {
    pub places: Vec<Place>,
    pub total_places: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// GET /api/places
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> AppResult<Json<PlaceListResponse>> {
    let Query(params) = params?;
    let page = params.page_request()?;
    let filter = params.filter();

    let mut conn = state.pool.acquire().await?;
    let total_places = PlaceRepo::count(&mut conn, &filter).await?;
    let places = PlaceRepo::search(&mut conn, &filter, &page).await?;

    Ok(Json(PlaceListResponse {
        places,
        total_places,
        page: page.page(),
        per_page: page.per_page(),
        total_pages: page.total_pages(total_places),
    }))
}

/// POST /api/places
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreatePlace>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Place>)> {
    let Json(input) = body?;
    let input = input.validate()?;

    let mut tx = state.pool.begin().await?;
    let id = PlaceRepo::create(&mut tx, &input)
        .await
        .on_integrity(CREATE_INTEGRITY, CREATE_INTEGRITY)?;
    let place = PlaceRepo::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("created place {id} not readable")))?;
    tx.commit().await?;

    tracing::info!(place_id = id, name = %place.name, "Place created");
    Ok((StatusCode::CREATED, Json(place)))
}

/// GET /api/places/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Place>> {
    let mut conn = state.pool.acquire().await?;
    let place = PlaceRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(place))
}

/// PUT /api/places/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<UpdatePlace>, JsonRejection>,
) -> AppResult<Json<Place>> {
    let Json(input) = body?;

    let mut tx = state.pool.begin().await?;
    let updated = PlaceRepo::update(&mut tx, id, &input)
        .await
        .on_integrity(UPDATE_INTEGRITY, UPDATE_INTEGRITY)?;
    if !updated {
        return Err(not_found(id));
    }
    let place = PlaceRepo::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    tracing::info!(place_id = id, "Place updated");
    Ok(Json(place))
}

/// DELETE /api/places/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.pool.begin().await?;
    let deleted = PlaceRepo::delete(&mut tx, id)
        .await
        .on_dependents(HAS_EVENTS)?;
    if !deleted {
        return Err(not_found(id));
    }
    tx.commit().await?;

    tracing::info!(place_id = id, "Place deleted");
    Ok(Json(MessageResponse::new(format!(
        "Place {id} deleted successfully."
    ))))
}

/// GET /api/places/{id}/events
pub async fn list_events(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<Event>>> {
    let mut conn = state.pool.acquire().await?;
    if !PlaceRepo::exists(&mut conn, id).await? {
        return Err(not_found(id));
    }
    let events = EventRepo::list_by_place(&mut conn, id).await?;
    Ok(Json(events))
}
