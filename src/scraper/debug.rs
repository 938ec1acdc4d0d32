//! Debug-markup capture
//!
//! When a readiness wait times out, the full page markup is written to the
//! run's debug directory so the failure can be diagnosed after the run.

use crate::driver::Driver;
use std::path::{Path, PathBuf};

/// Captures the current page markup into the debug directory.
///
/// The file is named `debug_page_<context>_<timestamp>.html`. Capture is
/// best-effort: any failure is logged and `None` returned, never raised.
pub async fn save_debug_page<D: Driver>(
    driver: &D,
    debug_dir: &Path,
    context: &str,
) -> Option<PathBuf> {
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f");
    let filename = format!("debug_page_{}_{}.html", context, timestamp);
    let filepath = debug_dir.join(filename);

    let markup = match driver.page_source().await {
        Ok(markup) => markup,
        Err(e) => {
            tracing::error!("Could not capture page markup for debugging: {}", e);
            return None;
        }
    };

    match std::fs::write(&filepath, markup) {
        Ok(()) => {
            tracing::info!("Debug page saved to: {}", filepath.display());
            Some(filepath)
        }
        Err(e) => {
            tracing::error!(
                "Could not write debug page {}: {}",
                filepath.display(),
                e
            );
            None
        }
    }
}
