//! Download-client adapter contract.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::providers::DownloadKind;

/// Errors surfaced by download adapters.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("download client connection failed: {0}")]
    ConnectionFailed(String),
    #[error("download client rejected the request: {0}")]
    Rejected(String),
}

/// Hand-off to a download client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnatchRequest {
    pub kind: DownloadKind,
    pub wanted_id: String,
    /// Display title the client should label the download with.
    pub title: String,
    pub url: String,
}

impl SnatchRequest {
    pub fn new(kind: DownloadKind, wanted_id: &str, title: &str, url: &str) -> Self {
        Self {
            kind,
            wanted_id: wanted_id.to_string(),
            title: title.to_string(),
            url: url.to_string(),
        }
    }
}

/// A client that can accept a snatch: SABnzbd, qBittorrent, a blackhole
/// directory. Implementations route on the request's download kind.
#[async_trait]
pub trait DownloadAdapter: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Submit the request. `Ok(true)` means the client accepted it;
    /// `Ok(false)` means it declined without an error to report.
    async fn snatch(&self, request: &SnatchRequest) -> Result<bool, DownloadError>;
}
