//! Snatch notifications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by notification sinks.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    DeliveryFailed(String),
}

/// What was snatched, for user-facing announcements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnatchEvent {
    pub title: String,
    pub provider: String,
    /// `%Y-%m-%d %H:%M:%S`, UTC.
    pub at: String,
}

/// Fire-and-forget announcement channel (email, Telegram, a webhook).
/// Delivery failures are logged by the caller and never affect the
/// snatch outcome.
#[async_trait]
pub trait SnatchNotifier: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    async fn notify_snatch(&self, event: &SnatchEvent) -> Result<(), NotifyError>;
}
