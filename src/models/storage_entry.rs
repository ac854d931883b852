use sqlx::prelude::FromRow;

/// One row of the key-value table
#[derive(Debug, Clone, FromRow)]
pub struct StorageEntryRecord {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}
