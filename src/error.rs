use thiserror::Error;

#[derive(Error, Debug)]
pub enum SousChefError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Shopping list item {index} out of range (list has {len} items)")]
    ShoppingItemOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, SousChefError>;
