//! Mock candidate source for testing.

use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::providers::{Candidate, CandidateSource, ProviderError};

/// Mock implementation of [`CandidateSource`].
///
/// Provides controllable behavior for testing:
/// - Set the candidate rows a poll returns
/// - Count how many polls happened
/// - Inject a one-shot error for the next poll
#[derive(Debug, Default)]
pub struct MockCandidateSource {
    results: RwLock<Vec<Candidate>>,
    polls: AtomicU32,
    next_error: RwLock<Option<ProviderError>>,
}

impl MockCandidateSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows returned by subsequent polls.
    pub async fn set_results(&self, results: Vec<Candidate>) {
        *self.results.write().await = results;
    }

    /// Append one row to the poll results.
    pub async fn add_result(&self, candidate: Candidate) {
        self.results.write().await.push(candidate);
    }

    /// Make the next poll fail with `error`.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Number of successful polls so far.
    pub fn poll_count(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateSource for MockCandidateSource {
    fn name(&self) -> &str {
        "mock-source"
    }

    async fn poll(&self) -> Result<Vec<Candidate>, ProviderError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }
        self.polls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.read().await.clone())
    }
}
