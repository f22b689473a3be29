//! Search pass types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::library::LibraryError;
use crate::providers::ProviderError;

/// Which provider class a pass polls. Doubles as the pass's task name,
/// so the registry refuses overlapping passes of the same kind while
/// different kinds run freely in parallel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Rss,
    Nzb,
    Torrent,
}

impl SearchKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchKind::Rss => "rss",
            SearchKind::Nzb => "nzb",
            SearchKind::Torrent => "torrent",
        }
    }

    /// Task-registry name for this pass kind.
    pub fn task_name(&self) -> &'static str {
        match self {
            SearchKind::Rss => "search-rss",
            SearchKind::Nzb => "search-nzb",
            SearchKind::Torrent => "search-torrent",
        }
    }
}

/// Final outcome for one wanted item in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnatchOutcome {
    /// No candidate survived filtering.
    NotFound,
    /// A best match existed but scored under the threshold.
    BelowThreshold,
    /// Another search path snatched the item first.
    AlreadySnatched,
    /// Persisted, submitted and accepted.
    Snatched,
    /// The download client declined or failed; the item stays wanted.
    SnatchFailed,
}

impl SnatchOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SnatchOutcome::NotFound => "not_found",
            SnatchOutcome::BelowThreshold => "below_threshold",
            SnatchOutcome::AlreadySnatched => "already_snatched",
            SnatchOutcome::Snatched => "snatched",
            SnatchOutcome::SnatchFailed => "snatch_failed",
        }
    }
}

/// Aggregate counts for one completed pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassSummary {
    /// Wanted items processed. An item retried with a shortened title
    /// still counts once.
    pub searched: u32,
    /// Items whose final outcome was a successful snatch.
    pub snatched: u32,
}

/// Pass-fatal errors. Download-adapter and notifier failures are
/// handled in-line and never surface here.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("a {0} pass is already running")]
    PassInFlight(&'static str),
    #[error("library store failed: {0}")]
    Store(#[from] LibraryError),
    #[error("candidate source failed: {0}")]
    Provider(#[from] ProviderError),
}
