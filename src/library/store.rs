//! Store contracts the engine depends on.
//!
//! Split by concern so tests and embedders can supply only what a code
//! path needs; [`SqliteLibrary`](super::SqliteLibrary) implements all
//! three.

use thiserror::Error;

use super::types::{DownloadRecord, WantedFilter, WantedItem};

#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("wanted item not found: {0}")]
    NotFound(String),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to wanted items.
pub trait WantedSource: Send + Sync {
    /// Items matching the filter, oldest first.
    fn list_wanted(&self, filter: &WantedFilter) -> Result<Vec<WantedItem>, LibraryError>;

    /// Whether another search path already snatched this item.
    ///
    /// Optimistic guard: callers check immediately before persisting a
    /// snatch, and a narrow window between this read and the write
    /// remains open. See [`SnatchDecision`](crate::search::SnatchDecision).
    fn is_already_snatched(&self, wanted_id: &str) -> Result<bool, LibraryError>;
}

/// Lookup of source URLs whose downloads previously failed.
pub trait FailureBlacklist: Send + Sync {
    fn has_failed(&self, source_url: &str) -> Result<bool, LibraryError>;
}

/// Write access for proposed download records.
pub trait DownloadSink: Send + Sync {
    /// Insert or update a record, keyed by its source URL.
    fn upsert_download(&self, record: &DownloadRecord) -> Result<(), LibraryError>;

    /// Flip the wanted item and its download record to snatched.
    fn mark_snatched(&self, wanted_id: &str, source_url: &str) -> Result<(), LibraryError>;
}
