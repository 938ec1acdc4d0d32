//! Record consolidation
//!
//! Reads every persisted record back from the store and merges them into
//! the single CSV artifact. Consolidation is defensive end to end: no
//! records means no output plus a diagnostic, and nothing here ever aborts
//! the surrounding run.

use crate::output::table::{build_table, write_csv};
use crate::output::traits::OutputResult;
use crate::storage::RecordStore;
use std::path::{Path, PathBuf};

/// Consolidates all records from `store` into a CSV table at `output_path`.
///
/// # Returns
///
/// * `Ok(Some(path))` - the artifact was written
/// * `Ok(None)` - nothing to consolidate (empty or fully unreadable store);
///   already logged
/// * `Err(OutputError)` - the store or the artifact write failed; also
///   logged here, callers only decide whether to continue
pub fn consolidate(store: &dyn RecordStore, output_path: &Path) -> OutputResult<Option<PathBuf>> {
    let loaded = match store.list_all() {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("Could not read back the record store: {}", e);
            return Err(e.into());
        }
    };

    if loaded.candidates == 0 {
        tracing::warn!("No record files found to consolidate.");
        return Ok(None);
    }

    if loaded.records.is_empty() {
        tracing::error!("No valid records could be loaded from the store.");
        return Ok(None);
    }

    tracing::info!(
        "Consolidating {} movie records into one table.",
        loaded.records.len()
    );

    let table = build_table(&loaded.records);

    if let Err(e) = write_csv(&table, output_path) {
        tracing::error!(
            "Could not write the consolidated table {}: {}",
            output_path.display(),
            e
        );
        return Err(e);
    }

    tracing::info!(
        "Consolidated table written to: {}",
        output_path.display()
    );
    Ok(Some(output_path.to_path_buf()))
}
