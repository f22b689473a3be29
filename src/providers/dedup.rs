//! Candidate de-duplication.
//!
//! Several providers can serve the same release, and a single RSS feed
//! can repeat a row across polls. One URL gets at most one shot at
//! ranking per pass.

use std::collections::HashSet;

use super::types::Candidate;

/// Collapse candidates sharing a source URL, keeping the first
/// occurrence. Order is otherwise preserved.
pub fn dedup_candidates(candidates: Vec<Candidate>) -> Vec<Candidate> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    let mut out = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if seen.insert(candidate.source_url.clone()) {
            out.push(candidate);
        }
    }
    out
}
