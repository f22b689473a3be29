//! Mock download adapter for testing.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::downloader::{DownloadAdapter, DownloadError, SnatchRequest};

/// Mock implementation of [`DownloadAdapter`].
///
/// Provides controllable behavior for testing:
/// - Accept (default) or decline every snatch
/// - Record every submitted request for inspection
/// - Inject a one-shot error for the next snatch
#[derive(Debug)]
pub struct MockDownloadAdapter {
    accept: AtomicBool,
    requests: RwLock<Vec<SnatchRequest>>,
    next_error: RwLock<Option<DownloadError>>,
}

impl Default for MockDownloadAdapter {
    fn default() -> Self {
        Self {
            accept: AtomicBool::new(true),
            requests: RwLock::new(Vec::new()),
            next_error: RwLock::new(None),
        }
    }
}

impl MockDownloadAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether subsequent snatches are accepted or declined.
    pub fn set_accept(&self, accept: bool) {
        self.accept.store(accept, Ordering::SeqCst);
    }

    /// Make the next snatch fail with `error`.
    pub async fn set_next_error(&self, error: DownloadError) {
        *self.next_error.write().await = Some(error);
    }

    /// All submitted requests, in call order.
    pub async fn recorded_requests(&self) -> Vec<SnatchRequest> {
        self.requests.read().await.clone()
    }
}

#[async_trait]
impl DownloadAdapter for MockDownloadAdapter {
    fn name(&self) -> &str {
        "mock-adapter"
    }

    async fn snatch(&self, request: &SnatchRequest) -> Result<bool, DownloadError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        self.requests.write().await.push(request.clone());
        Ok(self.accept.load(Ordering::SeqCst))
    }
}
