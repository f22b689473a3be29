//! Candidate ranking.
//!
//! Every surviving candidate is scored against the wanted item and the
//! single best is kept. The score blends two token-set ratios (author
//! and title, each against the normalized candidate title), subtracts
//! one point per leftover word the wanted item cannot account for, and
//! adds one point when the candidate names an accepted file format.

use chrono::Utc;
use tracing::debug;

use crate::library::{
    format_timestamp, DownloadRecord, DownloadStatus, FailureBlacklist, LibraryError, WantedItem,
};
use crate::matcher::types::{MatchProfile, MatchResult, Verdict};
use crate::matcher::{fuzz, normalize, reject, tokens};
use crate::providers::Candidate;

/// Rank `candidates` against a wanted item and return the best match.
///
/// `author` and `title` are the search terms of this attempt; a
/// shortened-title retry passes a different `title` than the item
/// carries. Ties keep the earliest candidate: the scan replaces the
/// leader only on a strictly greater score, so ranking the same slice
/// twice picks the same winner.
pub fn rank(
    item: &WantedItem,
    author: &str,
    title: &str,
    candidates: &[Candidate],
    profile: &MatchProfile,
    blacklist: &dyn FailureBlacklist,
) -> Result<Option<MatchResult>, LibraryError> {
    let author_words = tokens::split_list(&author.to_lowercase());
    let title_words = tokens::split_list(&title.to_lowercase());

    let mut best: Option<MatchResult> = None;
    for candidate in candidates {
        let normalized_title = normalize::normalize(&candidate.raw_title);

        match reject::evaluate(candidate, &normalized_title, author, title, profile, blacklist)? {
            Verdict::Rejected(reason) => {
                debug!(
                    title = %candidate.raw_title,
                    provider = %candidate.provider,
                    "rejected: {}",
                    reason
                );
                continue;
            }
            Verdict::Accepted => {}
        }

        let author_score = fuzz::token_set_ratio(author, &normalized_title);
        let title_score = fuzz::token_set_ratio(title, &normalized_title);
        let mut score = f64::from(author_score + title_score) / 2.0;

        // Words the wanted item cannot account for cost a point each;
        // trailing bracketed tags are not counted against the title.
        let stem = match normalized_title.rfind('[') {
            Some(idx) => &normalized_title[..idx],
            None => normalized_title.as_str(),
        };
        let stem_words = tokens::split_list(&stem.to_lowercase());
        let leftover = stem_words
            .iter()
            .filter(|&word| {
                !author_words.contains(word)
                    && !title_words.contains(word)
                    && !profile.formats.contains(word)
            })
            .count();
        score -= leftover as f64;

        if stem_words.iter().any(|word| profile.formats.contains(word)) {
            score += 1.0;
        }

        let replace = match &best {
            Some(current) => score > current.score,
            None => true,
        };
        if replace {
            best = Some(MatchResult {
                score,
                proposed: proposed_record(item, author, title, candidate),
                normalized_title,
                candidate: candidate.clone(),
            });
        }
    }

    Ok(best)
}

/// Build the download record a snatch of this candidate would persist.
fn proposed_record(
    item: &WantedItem,
    author: &str,
    title: &str,
    candidate: &Candidate,
) -> DownloadRecord {
    DownloadRecord {
        source_url: candidate.source_url.clone(),
        wanted_id: item.id.clone(),
        title: format!("{} - {} LL.({})", author, title, item.id),
        provider: candidate.provider.clone(),
        requested_at: format_timestamp(Utc::now()),
        size_mb: candidate.size_mb(),
        mode: candidate.kind(),
        media_type: item.media_type,
        status: DownloadStatus::Skipped,
    }
}
