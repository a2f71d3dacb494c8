//! Round trips against a real Postgres database.
//!
//! Skipped unless `TEST_DATABASE_URL` is set. Each test runs on a single
//! pooled connection inside a test transaction, so nothing is committed.

use diesel::r2d2::{ConnectionManager, Pool, TestCustomizer};
use diesel::PgConnection;
use recipebox_server::db;
use recipebox_server::models::{NewRecipe, RecipeChanges};
use recipebox_server::store::{PgStore, RecipeStore, SortField, StoreError, TextField};
use uuid::Uuid;

fn test_store() -> Option<PgStore> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return None;
    };

    let manager = ConnectionManager::<PgConnection>::new(url);
    let pool = Pool::builder()
        .max_size(1)
        .connection_customizer(Box::new(TestCustomizer))
        .build(manager)
        .expect("pool");
    {
        let mut conn = pool.get().expect("connection");
        db::run_migrations(&mut conn).expect("migrations");
    }
    Some(PgStore::new(pool))
}

/// A cuisine name no other row will share, so assertions ignore
/// pre-existing data in the database.
fn unique_cuisine() -> String {
    format!("cuisine-{}", Uuid::new_v4())
}

fn recipe(name: &str, cuisine: &str, rating: f64) -> NewRecipe {
    NewRecipe {
        name: name.to_string(),
        cuisine: cuisine.to_string(),
        rating,
        total_time: 45,
        servings: 3,
        description: "from the test suite".to_string(),
    }
}

#[test]
fn test_insert_then_find_by_id() {
    let Some(store) = test_store() else { return };
    let new = recipe("Soup", &unique_cuisine(), 4.5);

    let id = store.insert(&new).expect("insert");
    let found = store
        .find_by_id(&id.to_string())
        .expect("find")
        .expect("recipe exists");

    assert_eq!(found.name, new.name);
    assert_eq!(found.cuisine, new.cuisine);
    assert_eq!(found.rating, new.rating);
    assert_eq!(found.total_time, new.total_time);
    assert_eq!(found.servings, new.servings);
    assert_eq!(found.description, new.description);
}

#[test]
fn test_find_by_field_and_substring() {
    let Some(store) = test_store() else { return };
    let cuisine = unique_cuisine();
    let marker = Uuid::new_v4().simple().to_string();
    store
        .insert(&recipe(&format!("Onion {marker} Soup"), &cuisine, 4.0))
        .expect("insert");
    store
        .insert(&recipe("Curry", &cuisine, 3.0))
        .expect("insert");

    let by_cuisine = store
        .find_by_field(TextField::Cuisine, &cuisine)
        .expect("find by cuisine");
    assert_eq!(by_cuisine.len(), 2);

    let hits = store
        .find_by_substring(TextField::Name, &marker.to_uppercase())
        .expect("search");
    assert_eq!(hits.len(), 1);
    assert!(hits[0].name.starts_with("Onion"));
}

#[test]
fn test_substring_treats_wildcards_literally() {
    let Some(store) = test_store() else { return };
    let marker = Uuid::new_v4().simple().to_string();
    store
        .insert(&recipe(&format!("{marker} plain"), &unique_cuisine(), 1.0))
        .expect("insert");

    let hits = store
        .find_by_substring(TextField::Name, &format!("{marker}%"))
        .expect("search");
    assert!(hits.is_empty());
}

#[test]
fn test_top_n_is_bounded_and_sorted() {
    let Some(store) = test_store() else { return };
    for rating in [1.0, 2.0, 3.0, 4.0, 5.0] {
        store
            .insert(&recipe("Ranked", &unique_cuisine(), 1000.0 + rating))
            .expect("insert");
    }

    let top = store
        .find_top_n(3, SortField::Rating, true)
        .expect("top n");
    let ratings: Vec<f64> = top.iter().map(|r| r.rating).collect();
    assert_eq!(ratings, vec![1005.0, 1004.0, 1003.0]);

    assert!(store
        .find_top_n(0, SortField::Rating, true)
        .expect("top zero")
        .is_empty());
}

#[test]
fn test_update_and_delete() {
    let Some(store) = test_store() else { return };
    let id = store
        .insert(&recipe("Soup", &unique_cuisine(), 4.5))
        .expect("insert")
        .to_string();

    let changes = RecipeChanges {
        name: Some("Better Soup".to_string()),
        ..Default::default()
    };
    assert_eq!(store.update_by_id(&id, &changes).expect("update"), 1);
    let found = store.find_by_id(&id).expect("find").expect("exists");
    assert_eq!(found.name, "Better Soup");
    assert_eq!(found.rating, 4.5);

    assert_eq!(store.delete_by_id(&id).expect("delete"), 1);
    assert!(store.find_by_id(&id).expect("find").is_none());
    assert_eq!(store.delete_by_id(&id).expect("delete again"), 0);
}

#[test]
fn test_update_missing_id_is_noop() {
    let Some(store) = test_store() else { return };
    let missing = Uuid::new_v4().to_string();

    let changes = RecipeChanges {
        name: Some("Ghost".to_string()),
        ..Default::default()
    };
    assert_eq!(store.update_by_id(&missing, &changes).expect("update"), 0);
    assert!(store.find_by_id(&missing).expect("find").is_none());
}

#[test]
fn test_malformed_id_is_invalid_argument() {
    let Some(store) = test_store() else { return };
    assert!(matches!(
        store.find_by_id("nonexistent-id"),
        Err(StoreError::InvalidArgument(_))
    ));
}
