//! Candidate sources and their result rows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by candidate sources.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("provider connection failed: {0}")]
    ConnectionFailed(String),
    #[error("provider returned an invalid feed: {0}")]
    InvalidFeed(String),
}

/// How a candidate is fetched once snatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadKind {
    Nzb,
    Torrent,
    Magnet,
    Direct,
}

impl DownloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadKind::Nzb => "nzb",
            DownloadKind::Torrent => "torrent",
            DownloadKind::Magnet => "magnet",
            DownloadKind::Direct => "direct",
        }
    }

    pub fn parse(s: &str) -> Option<DownloadKind> {
        match s {
            "nzb" => Some(DownloadKind::Nzb),
            "torrent" => Some(DownloadKind::Torrent),
            "magnet" => Some(DownloadKind::Magnet),
            "direct" => Some(DownloadKind::Direct),
            _ => None,
        }
    }

    /// Infer the kind from the shape of a source URL: `magnet:` scheme,
    /// `.nzb` anywhere in the URL, otherwise a torrent file.
    pub fn from_url(url: &str) -> DownloadKind {
        if url.starts_with("magnet:") {
            DownloadKind::Magnet
        } else if url.contains(".nzb") {
            DownloadKind::Nzb
        } else {
            DownloadKind::Torrent
        }
    }
}

/// A single provider search-result row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Title as scraped from the feed, unnormalized.
    pub raw_title: String,
    /// Identity of the result; dedup and the failure blacklist key on it.
    pub source_url: String,
    /// Provider the row came from.
    pub provider: String,
    /// Reported size. Feeds frequently omit or mangle this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    /// Declared kind, when the provider exposes one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_kind: Option<DownloadKind>,
}

impl Candidate {
    /// Size in MB, rounded to two decimals. A missing size falls back to
    /// 1000 bytes so a malformed row degrades instead of aborting.
    pub fn size_mb(&self) -> f64 {
        let bytes = self.size_bytes.unwrap_or(1000);
        (bytes as f64 / 1_048_576.0 * 100.0).round() / 100.0
    }

    /// Effective download kind: declared, or inferred from the URL.
    pub fn kind(&self) -> DownloadKind {
        self.download_kind
            .unwrap_or_else(|| DownloadKind::from_url(&self.source_url))
    }
}

/// A polled aggregation of RSS, NZB or torrent provider feeds.
///
/// Implementations own fetching, parsing and caching; the engine only
/// sees the flattened candidate rows.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Short identifier for logs.
    fn name(&self) -> &str;

    /// Fetch the current candidate rows from every configured provider.
    async fn poll(&self) -> Result<Vec<Candidate>, ProviderError>;
}
