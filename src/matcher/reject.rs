//! Candidate elimination ahead of scoring.

use crate::library::{FailureBlacklist, LibraryError};
use crate::matcher::types::{MatchProfile, RejectReason, Verdict};
use crate::providers::Candidate;

/// Apply the reject rules to one candidate against one search attempt.
///
/// Rules run in order and short-circuit: failure blacklist, reject words,
/// then size bounds. A reject word is forgiven when it also occurs in the
/// author or the wanted title, so "War and Peace" survives a configured
/// reject word "war". Deterministic for a fixed blacklist state, so
/// re-running a pass over the same inputs rejects the same candidates.
///
/// `author` and `title` are the terms of the current attempt; the
/// shortened-title retry evaluates against its shortened terms.
pub fn evaluate(
    candidate: &Candidate,
    normalized_title: &str,
    author: &str,
    title: &str,
    profile: &MatchProfile,
    blacklist: &dyn FailureBlacklist,
) -> Result<Verdict, LibraryError> {
    if blacklist.has_failed(&candidate.source_url)? {
        return Ok(Verdict::Rejected(RejectReason::Blacklisted));
    }

    let lower_candidate = normalized_title.to_lowercase();
    let lower_author = author.to_lowercase();
    let lower_title = title.to_lowercase();
    for word in &profile.reject_words {
        if lower_candidate.contains(word)
            && !lower_author.contains(word)
            && !lower_title.contains(word)
        {
            return Ok(Verdict::Rejected(RejectReason::ContainsWord(word.clone())));
        }
    }

    let size_mb = candidate.size_mb();
    if profile.max_size_mb > 0 && size_mb > profile.max_size_mb as f64 {
        return Ok(Verdict::Rejected(RejectReason::TooLarge {
            size_mb,
            max_mb: profile.max_size_mb,
        }));
    }
    if profile.min_size_mb > 0 && size_mb < profile.min_size_mb as f64 {
        return Ok(Verdict::Rejected(RejectReason::TooSmall {
            size_mb,
            min_mb: profile.min_size_mb,
        }));
    }

    Ok(Verdict::Accepted)
}
