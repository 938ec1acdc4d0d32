//! JSON-file record store
//!
//! One pretty-printed `movie_<n>.json` per record, `n` assigned in emission
//! order. Listing reads the directory back sorted by `n` so consolidation
//! sees rows in emission order, however many records a run produced.

use crate::record::MovieRecord;
use crate::storage::traits::{LoadedRecords, RawRecord, RecordStore, StorageResult};
use std::path::{Path, PathBuf};

/// Stores each record as a JSON file in one directory.
pub struct JsonFileStore {
    dir: PathBuf,
    next_id: u32,
}

impl JsonFileStore {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: &Path) -> StorageResult<Self> {
        std::fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            next_id: 1,
        })
    }

    /// The directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RecordStore for JsonFileStore {
    fn put(&mut self, record: &MovieRecord) -> StorageResult<Option<u32>> {
        if !record.has_title() {
            tracing::warn!("Record has no usable title and will not be saved.");
            return Ok(None);
        }

        let id = self.next_id;
        let filepath = self.dir.join(format!("movie_{}.json", id));

        let json = serde_json::to_string_pretty(record)?;
        std::fs::write(&filepath, json)?;

        tracing::debug!("Movie record saved to: {}", filepath.display());
        self.next_id += 1;
        Ok(Some(id))
    }

    fn list_all(&self) -> StorageResult<LoadedRecords> {
        let mut paths: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        // Sort on the numeric id so movie_10 comes after movie_2, with a
        // name tiebreak for files that do not carry one.
        paths.sort_by(|a, b| {
            (record_id(a), a).cmp(&(record_id(b), b))
        });

        let mut loaded = LoadedRecords {
            candidates: paths.len(),
            records: Vec::new(),
        };

        for path in paths {
            let record = std::fs::read_to_string(&path)
                .map_err(|e| e.to_string())
                .and_then(|content| {
                    serde_json::from_str::<RawRecord>(&content).map_err(|e| e.to_string())
                });

            match record {
                Ok(record) => loaded.records.push(record),
                Err(e) => {
                    tracing::error!("Could not read record file {}: {}. Skipping.", path.display(), e);
                }
            }
        }

        Ok(loaded)
    }
}

/// Emission id parsed from a `movie_<n>.json` file name; files without one
/// sort after every record.
fn record_id(path: &Path) -> u32 {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .and_then(|stem| stem.strip_prefix("movie_"))
        .and_then(|n| n.parse().ok())
        .unwrap_or(u32::MAX)
}
