//! Release matching: normalization, fuzzy scoring, reject filtering and
//! candidate ranking.
//!
//! The pipeline for one wanted item is deliberately small:
//!
//! 1. [`normalize`] flattens each raw candidate title.
//! 2. [`reject`] eliminates blacklisted, wrongly worded or wrongly sized
//!    candidates.
//! 3. [`fuzz`] scores what survives.
//! 4. [`ranker`] keeps the single best candidate.

pub mod fuzz;
pub mod normalize;
pub mod ranker;
pub mod reject;
pub mod tokens;
mod types;

pub use types::{MatchProfile, MatchResult, RejectReason, Verdict};
