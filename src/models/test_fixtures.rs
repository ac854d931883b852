use rstest::*;
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};

use crate::catalog::RecipeCatalog;
use crate::models::api::Recipe;

/// Test fixture that creates an in-memory SQLite database with migrations applied
///
/// This fixture can be imported and used across all store tests to ensure
/// consistency in test database setup.
#[fixture]
pub async fn test_db() -> SqlitePool {
    // Create an in-memory SQLite database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[fixture]
pub fn catalog() -> RecipeCatalog {
    RecipeCatalog::default()
}

#[fixture]
pub fn cheeseburger(catalog: RecipeCatalog) -> Recipe {
    catalog
        .get_by_id("1")
        .cloned()
        .expect("Built-in catalog has recipe 1")
}

#[fixture]
pub fn pizza(catalog: RecipeCatalog) -> Recipe {
    catalog
        .get_by_id("2")
        .cloned()
        .expect("Built-in catalog has recipe 2")
}
