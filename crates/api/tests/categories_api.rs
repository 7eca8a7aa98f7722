//! HTTP-level integration tests for `/api/place_categories` and
//! `/api/event_categories`.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;

async fn app() -> Router {
    build_test_app(common::test_pool().await)
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_category_with_parent_chain() {
    let app = app().await;
    let food = create(&app, "/api/place_categories", json!({ "name": "Hrana i piće" })).await;
    let cafes = create(
        &app,
        "/api/place_categories",
        json!({ "name": "Kafići", "parent_id": food }),
    )
    .await;

    let response = post_json(
        app.clone(),
        "/api/place_categories",
        json!({ "name": "Poslastičarnice", "parent_id": cafes }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Poslastičarnice");
    assert_eq!(json["parent_id"], cafes);
    assert_eq!(json["parent"]["id"], cafes);
    assert_eq!(json["parent"]["parent"]["name"], "Hrana i piće");
    assert_eq!(json["parent"]["parent"]["parent"], serde_json::Value::Null);

    let id = json["id"].as_i64().unwrap();
    let fetched = body_json(get(app, &format!("/api/place_categories/{id}")).await).await;
    assert_eq!(fetched, json);
}

#[tokio::test]
async fn test_create_without_name_returns_400() {
    let app = app().await;
    let response = post_json(app, "/api/event_categories", json!({ "parent_id": null })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Missing required field: name."
    );
}

#[tokio::test]
async fn test_duplicate_name_returns_400() {
    let app = app().await;
    create(&app, "/api/event_categories", json!({ "name": "Koncerti" })).await;

    let response = post_json(
        app.clone(),
        "/api/event_categories",
        json!({ "name": "Koncerti" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["message"],
        "Category name already exists."
    );

    // Names are unique per kind, not across kinds.
    let response = post_json(app, "/api/place_categories", json!({ "name": "Koncerti" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_unknown_parent_returns_400() {
    let app = app().await;
    let response = post_json(
        app,
        "/api/place_categories",
        json!({ "name": "Siroče", "parent_id": 999 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INTEGRITY_ERROR");
}

#[tokio::test]
async fn test_get_missing_category_returns_404() {
    let app = app().await;
    let response = get(app, "/api/event_categories/5").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await["message"],
        "Event category with id 5 not found"
    );
}

// ---------------------------------------------------------------------------
// Listings
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_basic_and_tree() {
    let app = app().await;
    let food = create(&app, "/api/place_categories", json!({ "name": "Hrana" })).await;
    let culture = create(&app, "/api/place_categories", json!({ "name": "Kultura" })).await;
    let bakery = create(
        &app,
        "/api/place_categories",
        json!({ "name": "Pekare", "parent_id": food }),
    )
    .await;

    let all = body_json(get(app.clone(), "/api/place_categories").await).await;
    let all = all.as_array().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[2]["id"], bakery);
    assert_eq!(all[2]["parent"]["name"], "Hrana");

    let basic = body_json(get(app.clone(), "/api/place_categories/basic").await).await;
    let ids: Vec<i64> = basic
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![food, culture]);

    let tree = body_json(get(app.clone(), "/api/place_categories/tree").await).await;
    assert_eq!(tree[0]["id"], food);
    assert_eq!(tree[0]["children"][0]["id"], bakery);
    assert_eq!(tree[0]["children"][0]["children"], json!([]));
    assert_eq!(tree[1]["children"], json!([]));

    // The other kind is independent.
    let events = body_json(get(app, "/api/event_categories").await).await;
    assert_eq!(events, json!([]));
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_category() {
    let app = app().await;
    let music = create(&app, "/api/event_categories", json!({ "name": "Muzika" })).await;
    let rock = create(&app, "/api/event_categories", json!({ "name": "Rok" })).await;

    let response = put_json(
        app.clone(),
        &format!("/api/event_categories/{rock}"),
        json!({ "parent_id": music }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Rok");
    assert_eq!(json["parent"]["name"], "Muzika");

    let response = put_json(
        app.clone(),
        &format!("/api/event_categories/{rock}"),
        json!({ "name": "Muzika" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json(app, "/api/event_categories/999", json!({ "name": "X" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_rejects_cycles() {
    let app = app().await;
    let root = create(&app, "/api/place_categories", json!({ "name": "A" })).await;
    let child = create(
        &app,
        "/api/place_categories",
        json!({ "name": "B", "parent_id": root }),
    )
    .await;

    let response = put_json(
        app.clone(),
        &format!("/api/place_categories/{root}"),
        json!({ "parent_id": child }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    let response = put_json(
        app.clone(),
        &format!("/api/place_categories/{root}"),
        json!({ "parent_id": root }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(app, &format!("/api/place_categories/{root}")).await).await;
    assert_eq!(json["parent_id"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_delete_category_in_use_returns_409() {
    let app = app().await;
    let parks = create(&app, "/api/place_categories", json!({ "name": "Parkovi" })).await;
    let place = create(
        &app,
        "/api/places",
        json!({ "name": "Gradski park", "category_id": parks }),
    )
    .await;

    let response = delete(app.clone(), &format!("/api/place_categories/{parks}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let message = body_json(response).await["message"].as_str().unwrap().to_string();
    assert!(message.contains("places"), "got: {message}");

    let response = get(app.clone(), &format!("/api/places/{place}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app.clone(), &format!("/api/places/{place}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app, &format!("/api/place_categories/{parks}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        format!("Place category {parks} deleted successfully.")
    );
}

#[tokio::test]
async fn test_delete_category_with_children_returns_409() {
    let app = app().await;
    let sport = create(&app, "/api/event_categories", json!({ "name": "Sport" })).await;
    create(
        &app,
        "/api/event_categories",
        json!({ "name": "Fudbal", "parent_id": sport }),
    )
    .await;

    let response = delete(app.clone(), &format!("/api/event_categories/{sport}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = delete(app, "/api/event_categories/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
