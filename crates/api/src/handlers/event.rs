//! Handlers for the `/events` resource.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use cityguide_core::error::CoreError;
use cityguide_core::types::DbId;
use cityguide_db::models::event::{CreateEvent, Event, EventListItem, UpdateEvent};
use cityguide_db::models::place::Place;
use cityguide_db::repositories::{EventRepo, PlaceRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult, ConstraintResultExt};
use crate::query::ListingParams;
use crate::response::MessageResponse;
use crate::state::AppState;

const ENTITY: &str = "Event";

const CREATE_INTEGRITY: &str =
    "Integrity error: Check place_id or category_id (IDs might not exist).";
const UPDATE_INTEGRITY: &str = "Integrity error: Check place_id or category_id.";

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: ENTITY, id })
}

/// One page of events plus paging metadata.
#[derive(Debug, Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventListItem>,
    pub total_events: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// GET /api/events
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListingParams>, QueryRejection>,
) -> AppResult<Json<EventListResponse>> {
    let Query(params) = params?;
    let page = params.page_request()?;
    let filter = params.filter();

    let mut conn = state.pool.acquire().await?;
    let total_events = EventRepo::count(&mut conn, &filter).await?;
    let events = EventRepo::search(&mut conn, &filter, &page).await?;

    Ok(Json(EventListResponse {
        events,
        total_events,
        page: page.page(),
        per_page: page.per_page(),
        total_pages: page.total_pages(total_events),
    }))
}

/// POST /api/events
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<CreateEvent>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let Json(input) = body?;
    let input = input.validate()?;

    let mut tx = state.pool.begin().await?;
    let id = EventRepo::create(&mut tx, &input)
        .await
        .on_integrity(CREATE_INTEGRITY, CREATE_INTEGRITY)?;
    let event = EventRepo::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("created event {id} not readable")))?;
    tx.commit().await?;

    tracing::info!(event_id = id, name = %event.name, "Event created");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let mut conn = state.pool.acquire().await?;
    let event = EventRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(event))
}

/// PUT /api/events/{id}
///
/// A malformed `datetime` is rejected before the transaction opens.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    body: Result<Json<UpdateEvent>, JsonRejection>,
) -> AppResult<Json<Event>> {
    let Json(input) = body?;
    let changes = input.validate()?;

    let mut tx = state.pool.begin().await?;
    let updated = EventRepo::update(&mut tx, id, &changes)
        .await
        .on_integrity(UPDATE_INTEGRITY, UPDATE_INTEGRITY)?;
    if !updated {
        return Err(not_found(id));
    }
    let event = EventRepo::find_by_id(&mut tx, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tx.commit().await?;

    tracing::info!(event_id = id, "Event updated");
    Ok(Json(event))
}

/// DELETE /api/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let mut tx = state.pool.begin().await?;
    let deleted = EventRepo::delete(&mut tx, id).await?;
    if !deleted {
        return Err(not_found(id));
    }
    tx.commit().await?;

    tracing::info!(event_id = id, "Event deleted");
    Ok(Json(MessageResponse::new(format!(
        "Event {id} deleted successfully."
    ))))
}

/// GET /api/events/{id}/place
pub async fn get_place(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Place>> {
    let mut conn = state.pool.acquire().await?;
    let event = EventRepo::find_by_id(&mut conn, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    let place = PlaceRepo::find_by_id(&mut conn, event.place_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Place",
            id: event.place_id,
        }))?;
    Ok(Json(place))
}
