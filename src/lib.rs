//! paige-turner: a book and magazine acquisition engine.
//!
//! Given wanted items and noisy release titles polled from RSS, NZB and
//! torrent providers, the engine normalizes each title, scores it with
//! token-set fuzzy similarity, filters out blacklisted or wrongly sized
//! releases, keeps the best match per item and decides whether to snatch
//! it through a download-client adapter.
//!
//! External collaborators are traits: stores ([`library`]), candidate
//! feeds ([`providers`]), download clients ([`downloader`]), notifiers
//! ([`notify`]) and the post-processing job ([`postprocess`]).
//! [`SqliteLibrary`] is the bundled store; [`testing`] carries mocks for
//! everything else.

pub mod config;
pub mod downloader;
pub mod library;
pub mod matcher;
pub mod metrics;
pub mod notify;
pub mod postprocess;
pub mod providers;
pub mod scheduler;
pub mod search;
pub mod testing;

pub use config::{load_config, load_config_from_str, Config, ConfigError, SearchConfig};
pub use library::{
    DownloadRecord, DownloadStatus, LibraryError, MediaType, NewWantedItem, SqliteLibrary,
    WantedItem, WantedStatus,
};
pub use matcher::{MatchProfile, MatchResult};
pub use providers::{Candidate, CandidateSource, DownloadKind};
pub use search::{PassSummary, SearchError, SearchKind, SearchRunner, SnatchOutcome};
