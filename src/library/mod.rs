//! Wanted items, download records and the store contracts.

mod sqlite;
mod store;
mod types;

pub use sqlite::SqliteLibrary;
pub use store::{DownloadSink, FailureBlacklist, LibraryError, WantedSource};
pub use types::{
    format_timestamp, DownloadRecord, DownloadStatus, MediaType, NewWantedItem, WantedFilter,
    WantedItem, WantedStatus,
};
