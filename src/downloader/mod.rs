//! Download clients the engine hands accepted matches to.

mod types;

pub use types::{DownloadAdapter, DownloadError, SnatchRequest};
