//! Device-local key-value storage.
//!
//! Every collection is a single JSON document stored under a fixed key in the
//! `kv_store` table. Writes replace the whole document.

use serde::Serialize;
use serde::de::DeserializeOwned;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::error::Result;
use crate::models::StorageEntryRecord;

pub const SAVED_RECIPES_KEY: &str = "@recipe_app:saved_recipes";
pub const SHOPPING_LIST_KEY: &str = "@recipe_app:shopping_list";

/// Open (creating if needed) the database at `database_url` and apply migrations
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    // Create database if it doesn't exist
    if !sqlx::Sqlite::database_exists(database_url).await? {
        log::info!("Creating database {}", database_url);
        sqlx::Sqlite::create_database(database_url).await?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    log::info!("Running migrations...");
    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}

/// Raw value stored under `key`, if any
pub async fn get_item(pool: &SqlitePool, key: &str) -> Result<Option<String>> {
    let entry = sqlx::query_as::<_, StorageEntryRecord>(
        "SELECT key, value, updated_at FROM kv_store WHERE key = ?",
    )
    .bind(key)
    .fetch_optional(pool)
    .await?;

    Ok(entry.map(|entry| entry.value))
}

/// Insert or replace the value stored under `key`
pub async fn set_item(pool: &SqlitePool, key: &str, value: &str) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO kv_store (key, value) VALUES (?, ?)
        ON CONFLICT(key) DO UPDATE SET
            value = excluded.value,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;

    Ok(())
}

/// Parse the document under `key`; `None` when nothing has been stored yet
pub(crate) async fn load_json<T: DeserializeOwned>(pool: &SqlitePool, key: &str) -> Result<Option<T>> {
    match get_item(pool, key).await? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

pub(crate) async fn store_json<T: Serialize + ?Sized>(pool: &SqlitePool, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    set_item(pool, key, &json).await
}
