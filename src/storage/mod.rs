//! Storage module for persisting extracted records
//!
//! Each successfully extracted, title-bearing record becomes one entry in a
//! [`RecordStore`]; the consolidator later re-reads every entry to build the
//! final table. The file-backed store is the production backend, the
//! in-memory store serves tests.

mod json_files;
mod memory;
mod traits;

pub use json_files::JsonFileStore;
pub use memory::MemoryStore;
pub use traits::{LoadedRecords, RawRecord, RecordStore, StorageError, StorageResult};
