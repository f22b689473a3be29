//! Mock snatch notifier for testing.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::notify::{NotifyError, SnatchEvent, SnatchNotifier};

/// Mock implementation of [`SnatchNotifier`] that records delivered
/// events and can fail one delivery on demand.
#[derive(Debug, Default)]
pub struct MockNotifier {
    events: RwLock<Vec<SnatchEvent>>,
    next_error: RwLock<Option<NotifyError>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next delivery fail with `error`.
    pub async fn set_next_error(&self, error: NotifyError) {
        *self.next_error.write().await = Some(error);
    }

    /// All delivered events, in call order.
    pub async fn recorded_events(&self) -> Vec<SnatchEvent> {
        self.events.read().await.clone()
    }
}

#[async_trait]
impl SnatchNotifier for MockNotifier {
    fn name(&self) -> &str {
        "mock-notifier"
    }

    async fn notify_snatch(&self, event: &SnatchEvent) -> Result<(), NotifyError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        self.events.write().await.push(event.clone());
        Ok(())
    }
}
