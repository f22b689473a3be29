//! Search passes: ranking wanted items against polled candidates and
//! deciding snatches.

mod decision;
mod runner;
mod types;

pub use decision::SnatchDecision;
pub use runner::SearchRunner;
pub use types::{PassSummary, SearchError, SearchKind, SnatchOutcome};
