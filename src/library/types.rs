//! Wanted items and download records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::providers::DownloadKind;

/// Media class of a wanted item. Each class carries its own matching
/// profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    EBook,
    AudioBook,
    Magazine,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::EBook => "ebook",
            MediaType::AudioBook => "audiobook",
            MediaType::Magazine => "magazine",
        }
    }

    pub fn parse(s: &str) -> Option<MediaType> {
        match s {
            "ebook" => Some(MediaType::EBook),
            "audiobook" => Some(MediaType::AudioBook),
            "magazine" => Some(MediaType::Magazine),
            _ => None,
        }
    }
}

/// Lifecycle state of a wanted item. The engine only ever moves items
/// from `Wanted` to `Snatched`; every other transition belongs to the
/// surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WantedStatus {
    Skipped,
    Wanted,
    Have,
    Open,
    Ignored,
    Snatched,
}

impl WantedStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WantedStatus::Skipped => "skipped",
            WantedStatus::Wanted => "wanted",
            WantedStatus::Have => "have",
            WantedStatus::Open => "open",
            WantedStatus::Ignored => "ignored",
            WantedStatus::Snatched => "snatched",
        }
    }

    pub fn parse(s: &str) -> Option<WantedStatus> {
        match s {
            "skipped" => Some(WantedStatus::Skipped),
            "wanted" => Some(WantedStatus::Wanted),
            "have" => Some(WantedStatus::Have),
            "open" => Some(WantedStatus::Open),
            "ignored" => Some(WantedStatus::Ignored),
            "snatched" => Some(WantedStatus::Snatched),
            _ => None,
        }
    }
}

/// State of a download record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    /// Proposed; the download client has not confirmed it.
    Skipped,
    /// Accepted by the download client.
    Snatched,
    /// Download failed; the URL is blacklisted from future passes.
    Failed,
}

impl DownloadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Skipped => "skipped",
            DownloadStatus::Snatched => "snatched",
            DownloadStatus::Failed => "failed",
        }
    }

    pub fn parse(s: &str) -> Option<DownloadStatus> {
        match s {
            "skipped" => Some(DownloadStatus::Skipped),
            "snatched" => Some(DownloadStatus::Snatched),
            "failed" => Some(DownloadStatus::Failed),
            _ => None,
        }
    }
}

/// A book or magazine the user wants to acquire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WantedItem {
    /// Opaque store key.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub author_name: String,
    pub media_type: MediaType,
    pub status: WantedStatus,
    pub added_at: DateTime<Utc>,
}

/// Request to register a new wanted item. The store assigns the id,
/// status and timestamp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWantedItem {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    pub author_name: String,
    pub media_type: MediaType,
}

/// Row proposed for the downloads table when a candidate is ranked best.
/// Keyed by source URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadRecord {
    pub source_url: String,
    pub wanted_id: String,
    /// Display title, `<author> - <title> LL.(<id>)`. The parenthesized
    /// id lets the post-processor tie a finished download back to its
    /// wanted item.
    pub title: String,
    pub provider: String,
    /// `%Y-%m-%d %H:%M:%S`, UTC.
    pub requested_at: String,
    /// Rounded to two decimals.
    pub size_mb: f64,
    pub mode: DownloadKind,
    pub media_type: MediaType,
    pub status: DownloadStatus,
}

/// Filter for listing wanted items.
#[derive(Debug, Clone, Default)]
pub struct WantedFilter {
    pub media_type: Option<MediaType>,
    pub status: Option<WantedStatus>,
    pub limit: Option<u32>,
}

impl WantedFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media_type(mut self, media_type: MediaType) -> Self {
        self.media_type = Some(media_type);
        self
    }

    pub fn with_status(mut self, status: WantedStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Format a timestamp the way download records and snatch events carry
/// it.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}
