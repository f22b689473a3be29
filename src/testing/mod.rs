//! Test doubles for every collaborator the engine talks to.
//!
//! Compiled into the library so integration tests and downstream crates
//! can wire a full engine without a database, a feed or a download
//! client.

mod mock_adapter;
mod mock_library;
mod mock_notifier;
mod mock_postprocess;
mod mock_source;

pub use mock_adapter::MockDownloadAdapter;
pub use mock_library::MockLibrary;
pub use mock_notifier::MockNotifier;
pub use mock_postprocess::MockPostProcess;
pub use mock_source::MockCandidateSource;

/// Canned domain objects for tests.
pub mod fixtures {
    use chrono::Utc;

    use crate::library::{
        format_timestamp, DownloadRecord, DownloadStatus, MediaType, WantedItem, WantedStatus,
    };
    use crate::matcher::{MatchProfile, MatchResult};
    use crate::providers::Candidate;

    /// A wanted ebook with reasonable defaults.
    pub fn wanted_ebook(id: &str, author: &str, title: &str) -> WantedItem {
        WantedItem {
            id: id.to_string(),
            title: title.to_string(),
            subtitle: None,
            author_name: author.to_string(),
            media_type: MediaType::EBook,
            status: WantedStatus::Wanted,
            added_at: Utc::now(),
        }
    }

    /// A wanted audiobook with reasonable defaults.
    pub fn wanted_audiobook(id: &str, author: &str, title: &str) -> WantedItem {
        WantedItem {
            media_type: MediaType::AudioBook,
            ..wanted_ebook(id, author, title)
        }
    }

    /// A 2 MB candidate row from a mock provider.
    pub fn candidate(raw_title: &str, source_url: &str) -> Candidate {
        Candidate {
            raw_title: raw_title.to_string(),
            source_url: source_url.to_string(),
            provider: "mock-provider".to_string(),
            size_bytes: Some(2 * 1024 * 1024),
            download_kind: None,
        }
    }

    /// The default ebook matching profile (threshold 90, epub/mobi/pdf).
    pub fn ebook_profile() -> MatchProfile {
        crate::config::SearchConfig::default().profile_for(MediaType::EBook)
    }

    /// A match result shaped the way the ranker builds one, with the
    /// score pinned by the caller.
    pub fn match_result(item: &WantedItem, candidate: &Candidate, score: f64) -> MatchResult {
        MatchResult {
            score,
            normalized_title: candidate.raw_title.clone(),
            candidate: candidate.clone(),
            proposed: DownloadRecord {
                source_url: candidate.source_url.clone(),
                wanted_id: item.id.clone(),
                title: format!("{} - {} LL.({})", item.author_name, item.title, item.id),
                provider: candidate.provider.clone(),
                requested_at: format_timestamp(Utc::now()),
                size_mb: candidate.size_mb(),
                mode: candidate.kind(),
                media_type: item.media_type,
                status: DownloadStatus::Skipped,
            },
        }
    }
}
