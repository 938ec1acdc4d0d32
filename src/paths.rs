//! Per-run directory layout
//!
//! Every run gets its own timestamped tree under the configured base
//! directory:
//!
//! ```text
//! <base>/run_<timestamp>/
//!   dados_extraidos/    one JSON file per record
//!   dados_processados/  the consolidated table
//!   debug/              page markup captured on readiness timeouts
//!   log/                execution.log
//! ```

use std::path::{Path, PathBuf};

/// The directory tree of one run.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub records_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub debug_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl RunPaths {
    /// Creates a fresh timestamped run tree under `base_dir`.
    ///
    /// Directory creation failure is a fatal setup error; nothing in the
    /// pipeline can run without the tree.
    pub fn create(base_dir: &Path) -> std::io::Result<Self> {
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S");
        let root = base_dir.join(format!("run_{}", timestamp));
        Self::create_at(&root)
    }

    /// Creates (or completes) the run tree rooted at `root`.
    pub fn create_at(root: &Path) -> std::io::Result<Self> {
        let paths = Self {
            root: root.to_path_buf(),
            records_dir: root.join("dados_extraidos"),
            processed_dir: root.join("dados_processados"),
            debug_dir: root.join("debug"),
            log_dir: root.join("log"),
        };

        std::fs::create_dir_all(&paths.records_dir)?;
        std::fs::create_dir_all(&paths.processed_dir)?;
        std::fs::create_dir_all(&paths.debug_dir)?;
        std::fs::create_dir_all(&paths.log_dir)?;

        Ok(paths)
    }

    /// Opens an existing run tree without creating anything.
    ///
    /// Used by the consolidate-only mode over a finished run.
    pub fn existing(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            records_dir: root.join("dados_extraidos"),
            processed_dir: root.join("dados_processados"),
            debug_dir: root.join("debug"),
            log_dir: root.join("log"),
        }
    }
}
