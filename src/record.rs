//! The movie record data model
//!
//! A [`MovieRecord`] is the unit of extraction: built empty by the detail
//! fetcher, populated field by field (each field independently fallible),
//! and handed off to storage once assembly finishes.

use serde::{Deserialize, Serialize};

/// One fully- or partially-populated movie record.
///
/// Every field is optional: a field that could not be resolved on the detail
/// page is carried as `None` and renders as an empty cell in the final table.
/// The serialized key order of this struct fixes the column order of the
/// consolidated output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: Option<String>,
    pub year: Option<String>,
    /// Normalized runtime, `"<H>h <M>min"` with zero components omitted
    pub runtime: Option<String>,
    pub rating: Option<String>,
    pub synopsis: Option<String>,
}

impl MovieRecord {
    /// Returns true if this record may be persisted.
    ///
    /// A record without a non-empty title is discarded before storage.
    pub fn has_title(&self) -> bool {
        self.title
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty())
    }
}
