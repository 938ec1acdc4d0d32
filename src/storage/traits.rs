//! Record store trait and error types

use crate::record::MovieRecord;
use thiserror::Error;

/// Errors that can occur during record storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A raw persisted record: keys in stored order, values as JSON.
///
/// The consolidator works on raw maps rather than [`MovieRecord`] so the
/// column schema genuinely comes from the stored data, not from the struct.
pub type RawRecord = serde_json::Map<String, serde_json::Value>;

/// Result of loading every persisted record back from the store.
#[derive(Debug, Default)]
pub struct LoadedRecords {
    /// How many candidate record entries the store held
    pub candidates: usize,

    /// The records that loaded successfully, in store order
    pub records: Vec<RawRecord>,
}

/// Trait for record store backends
///
/// A store accepts one record at a time during the crawl and hands all of
/// them back for consolidation afterwards. Implementations enforce the
/// persistence invariant: a record without a title is rejected, not stored.
pub trait RecordStore {
    /// Persists a record.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(id))` - stored under the 1-based emission id
    /// * `Ok(None)` - rejected because the record has no usable title
    /// * `Err(StorageError)` - the store itself failed
    fn put(&mut self, record: &MovieRecord) -> StorageResult<Option<u32>>;

    /// Loads all persisted records.
    ///
    /// An entry that cannot be read or parsed is logged and skipped; it
    /// still counts toward [`LoadedRecords::candidates`].
    fn list_all(&self) -> StorageResult<LoadedRecords>;
}
