//! Types shared across the matching pipeline.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::library::DownloadRecord;
use crate::providers::Candidate;

/// Resolved matching configuration for one media type, built once at the
/// start of a search pass and immutable for its duration.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchProfile {
    /// Minimum score (integer percentage) a best match must reach to be
    /// snatched.
    pub match_ratio: u32,
    /// Lowercased words whose presence rejects a candidate.
    pub reject_words: Vec<String>,
    /// Lower size bound in MB; 0 disables the check.
    pub min_size_mb: u64,
    /// Upper size bound in MB; 0 disables the check.
    pub max_size_mb: u64,
    /// Lowercased file-format keywords counted in the candidate's favor.
    pub formats: Vec<String>,
}

/// Outcome of the reject filter for a single candidate.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Accepted,
    Rejected(RejectReason),
}

/// Why a candidate was eliminated before scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// The source URL failed to download before and is blacklisted.
    Blacklisted,
    /// The normalized title contains a configured reject word.
    ContainsWord(String),
    /// Larger than the configured maximum.
    TooLarge { size_mb: f64, max_mb: u64 },
    /// Smaller than the configured minimum.
    TooSmall { size_mb: f64, min_mb: u64 },
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::Blacklisted => write!(f, "url previously failed"),
            RejectReason::ContainsWord(word) => write!(f, "contains '{}'", word),
            RejectReason::TooLarge { size_mb, max_mb } => {
                write!(f, "too large ({:.2} MB > {} MB)", size_mb, max_mb)
            }
            RejectReason::TooSmall { size_mb, min_mb } => {
                write!(f, "too small ({:.2} MB < {} MB)", size_mb, min_mb)
            }
        }
    }
}

/// Best-candidate output of the ranker for one wanted item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Averaged fuzzy score minus the word-overlap penalty plus the
    /// format bonus. Real-valued and can go negative.
    pub score: f64,
    /// Normalized candidate title the score was computed against.
    pub normalized_title: String,
    /// The winning candidate.
    pub candidate: Candidate,
    /// Record to persist if this match is snatched.
    pub proposed: DownloadRecord,
}
