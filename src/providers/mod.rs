//! Candidate sources: provider feeds flattened into result rows.

mod dedup;
mod types;

pub use dedup::dedup_candidates;
pub use types::{Candidate, CandidateSource, DownloadKind, ProviderError};
