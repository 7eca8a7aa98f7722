//! Shared helpers for repository integration tests.

#![allow(dead_code)]

use cityguide_db::models::category::{CategoryKind, NewCategory};
use cityguide_db::models::place::NewPlace;
use cityguide_db::repositories::{CategoryRepo, PlaceRepo};
use cityguide_db::DbPool;

/// A fresh, migrated in-memory database.
pub async fn test_pool() -> DbPool {
    let pool = cityguide_db::create_pool("sqlite::memory:")
        .await
        .expect("in-memory pool");
    cityguide_db::run_migrations(&pool)
        .await
        .expect("migrations apply");
    pool
}

pub async fn seed_category(
    pool: &DbPool,
    kind: CategoryKind,
    name: &str,
    parent_id: Option<i64>,
) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    CategoryRepo::create(
        &mut conn,
        kind,
        &NewCategory {
            name: name.to_string(),
            parent_id,
        },
    )
    .await
    .unwrap()
    .id
}

pub fn new_place(name: &str, description: Option<&str>, category_id: i64) -> NewPlace {
    NewPlace {
        name: name.to_string(),
        description: description.map(str::to_string),
        position: None,
        address: None,
        image_url: None,
        category_id,
    }
}

pub async fn seed_place(
    pool: &DbPool,
    name: &str,
    description: Option<&str>,
    category_id: i64,
) -> i64 {
    let mut conn = pool.acquire().await.unwrap();
    PlaceRepo::create(&mut conn, &new_place(name, description, category_id))
        .await
        .unwrap()
}
