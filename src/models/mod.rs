mod storage_entry;

pub mod api;

#[cfg(test)]
pub mod test_fixtures;

pub use storage_entry::StorageEntryRecord;
