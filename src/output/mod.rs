//! Output module for the consolidated table and the run summary
//!
//! This module handles:
//! - Building a fixed-schema table from the persisted records
//! - Writing the CSV artifact
//! - The terminal summary printed at the end of every run

mod consolidate;
mod summary;
mod table;
mod traits;

pub use consolidate::consolidate;
pub use summary::{RunSummary, RunTally};
pub use table::{build_table, write_csv, Table};
pub use traits::{OutputError, OutputResult};
