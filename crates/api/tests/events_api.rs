//! HTTP-level integration tests for the `/api/events` endpoints.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, build_test_app, create, delete, get, post_json, put_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    app: Router,
    place_id: i64,
    concerts: i64,
    sport: i64,
}

/// One place (with a position) and two event categories.
async fn fixture() -> Fixture {
    let app = build_test_app(common::test_pool().await);
    let squares = create(&app, "/api/place_categories", json!({ "name": "Trgovi" })).await;
    let place_id = create(
        &app,
        "/api/places",
        json!({ "name": "Trg slobode", "position": "45.3816,20.3886", "category_id": squares }),
    )
    .await;
    let concerts = create(&app, "/api/event_categories", json!({ "name": "Koncerti" })).await;
    let sport = create(&app, "/api/event_categories", json!({ "name": "Sport" })).await;

    Fixture {
        app,
        place_id,
        concerts,
        sport,
    }
}

async fn event(f: &Fixture, name: &str, description: Option<&str>, category_id: i64) -> i64 {
    create(
        &f.app,
        "/api/events",
        json!({
            "name": name,
            "description": description,
            "datetime": "2025-07-01T20:00:00",
            "place_id": f.place_id,
            "category_id": category_id,
        }),
    )
    .await
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_event() {
    let f = fixture().await;

    let response = post_json(
        f.app.clone(),
        "/api/events",
        json!({
            "name": "Džez veče",
            "datetime": "2025-07-04 21:30",
            "image_url": "static/uploads/events/jazz.jpg",
            "place_id": f.place_id,
            "category_id": f.concerts,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Džez veče");
    assert_eq!(json["datetime"], "2025-07-04T21:30:00");
    assert_eq!(json["image_url"], "static/uploads/events/jazz.jpg");
    assert_eq!(json["place_id"], f.place_id);
    assert_eq!(
        json["category"],
        json!({ "id": f.concerts, "name": "Koncerti", "parent_id": null })
    );
}

#[tokio::test]
async fn test_create_missing_category_names_field() {
    let f = fixture().await;

    let response = post_json(
        f.app.clone(),
        "/api/events",
        json!({ "name": "Bez kategorije", "datetime": "2025-07-01T20:00:00", "place_id": f.place_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert!(json["message"].as_str().unwrap().contains("category_id"));
}

#[tokio::test]
async fn test_create_with_bad_datetime_returns_400() {
    let f = fixture().await;

    let response = post_json(
        f.app.clone(),
        "/api/events",
        json!({
            "name": "Sutra",
            "datetime": "sutra uveče",
            "place_id": f.place_id,
            "category_id": f.concerts,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_with_unknown_place_returns_400() {
    let f = fixture().await;

    let response = post_json(
        f.app.clone(),
        "/api/events",
        json!({
            "name": "Nigde",
            "datetime": "2025-07-01T20:00:00",
            "place_id": 999,
            "category_id": f.concerts,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INTEGRITY_ERROR");
}

#[tokio::test]
async fn test_update_event() {
    let f = fixture().await;
    let id = event(&f, "Leto na trgu", Some("Besplatno"), f.concerts).await;

    let response = put_json(
        f.app.clone(),
        &format!("/api/events/{id}"),
        json!({ "datetime": "2025-07-02T19:00", "category_id": f.sport }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["name"], "Leto na trgu");
    assert_eq!(json["description"], "Besplatno");
    assert_eq!(json["datetime"], "2025-07-02T19:00:00");
    assert_eq!(json["category"]["name"], "Sport");
}

#[tokio::test]
async fn test_update_with_bad_datetime_writes_nothing() {
    let f = fixture().await;
    let id = event(&f, "Leto na trgu", None, f.concerts).await;

    let response = put_json(
        f.app.clone(),
        &format!("/api/events/{id}"),
        json!({ "name": "Promenjeno", "datetime": "32.13.2025" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(get(f.app.clone(), &format!("/api/events/{id}")).await).await;
    assert_eq!(json["name"], "Leto na trgu");
    assert_eq!(json["datetime"], "2025-07-01T20:00:00");
}

#[tokio::test]
async fn test_delete_event() {
    let f = fixture().await;
    let id = event(&f, "Leto na trgu", None, f.concerts).await;

    let response = delete(f.app.clone(), &format!("/api/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await["message"],
        format!("Event {id} deleted successfully.")
    );

    let response = delete(f.app.clone(), &format!("/api/events/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_event_place() {
    let f = fixture().await;
    let id = event(&f, "Leto na trgu", None, f.concerts).await;

    let response = get(f.app.clone(), &format!("/api/events/{id}/place")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["id"], f.place_id);
    assert_eq!(json["name"], "Trg slobode");

    let response = get(f.app.clone(), "/api/events/999/place").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_carries_place_position() {
    let f = fixture().await;
    event(&f, "Leto na trgu", None, f.concerts).await;
    event(&f, "Gradska trka", Some("Maraton kroz centar"), f.sport).await;

    let json = body_json(get(f.app.clone(), "/api/events").await).await;
    assert_eq!(json["total_events"], 2);
    assert_eq!(json["total_pages"], 1);

    let events = json["events"].as_array().unwrap();
    assert_eq!(events[0]["name"], "Leto na trgu");
    assert!(events.iter().all(|e| e["position"] == "45.3816,20.3886"));
    assert!(events.iter().all(|e| e["category"].is_object()));
}

#[tokio::test]
async fn test_list_filters_and_searches() {
    let f = fixture().await;
    event(&f, "Leto na trgu", None, f.concerts).await;
    event(&f, "Gradska trka", Some("Maraton kroz centar"), f.sport).await;
    event(&f, "Rok koncert", None, f.concerts).await;

    let json = body_json(get(f.app.clone(), "/api/events?categories=Sport").await).await;
    assert_eq!(json["total_events"], 1);
    assert_eq!(json["events"][0]["name"], "Gradska trka");

    let json = body_json(get(f.app.clone(), "/api/events?search=MARATON").await).await;
    assert_eq!(json["total_events"], 1);

    let uri = "/api/events?categories=Koncerti&per_page=1&page=2";
    let json = body_json(get(f.app.clone(), uri).await).await;
    assert_eq!(json["total_events"], 2);
    assert_eq!(json["total_pages"], 2);
    assert_eq!(json["events"][0]["name"], "Rok koncert");
}

#[tokio::test]
async fn test_search_folds_serbian_letters() {
    let f = fixture().await;
    let id = event(&f, "Džez veče", Some("Večernji program"), f.concerts).await;
    event(&f, "Gradska trka", None, f.sport).await;

    // ?search=DŽEZ
    let json = body_json(get(f.app.clone(), "/api/events?search=D%C5%BDEZ").await).await;
    assert_eq!(json["total_events"], 1);
    assert_eq!(json["events"][0]["name"], "Džez veče");

    let body = json!({ "description": "Čitanje poezije" });
    let response = put_json(f.app.clone(), &format!("/api/events/{id}"), body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // ?search=ČITANJE
    let json = body_json(get(f.app.clone(), "/api/events?search=%C4%8CITANJE").await).await;
    assert_eq!(json["total_events"], 1);
    // ?search=VEČERNJI
    let json = body_json(get(f.app.clone(), "/api/events?search=VE%C4%8CERNJI").await).await;
    assert_eq!(json["total_events"], 0);
}
