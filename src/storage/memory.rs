//! In-memory record store
//!
//! Backs tests and dry experiments with the same contract as the file
//! store, without touching the filesystem.

use crate::record::MovieRecord;
use crate::storage::traits::{LoadedRecords, RecordStore, StorageResult};

/// Keeps records in a plain vector.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Vec<MovieRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for MemoryStore {
    fn put(&mut self, record: &MovieRecord) -> StorageResult<Option<u32>> {
        if !record.has_title() {
            tracing::warn!("Record has no usable title and will not be saved.");
            return Ok(None);
        }

        self.records.push(record.clone());
        Ok(Some(self.records.len() as u32))
    }

    fn list_all(&self) -> StorageResult<LoadedRecords> {
        let mut loaded = LoadedRecords {
            candidates: self.records.len(),
            records: Vec::new(),
        };

        for record in &self.records {
            let value = serde_json::to_value(record)?;
            if let serde_json::Value::Object(map) = value {
                loaded.records.push(map);
            }
        }

        Ok(loaded)
    }
}
