//! Mock post-process scheduler for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use crate::postprocess::PostProcessScheduler;

/// Mock implementation of [`PostProcessScheduler`] that counts kicks.
#[derive(Debug, Default)]
pub struct MockPostProcess {
    scheduled: AtomicU32,
}

impl MockPostProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the job was kicked.
    pub fn scheduled(&self) -> u32 {
        self.scheduled.load(Ordering::SeqCst)
    }
}

impl PostProcessScheduler for MockPostProcess {
    fn schedule_post_process(&self) {
        self.scheduled.fetch_add(1, Ordering::SeqCst);
    }
}
