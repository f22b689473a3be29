//! Prometheus metrics for the search engine.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

/// Completed search passes, by pass kind.
pub static SEARCH_PASSES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("paige_search_passes_total", "Total completed search passes"),
        &["kind"],
    )
    .unwrap()
});

/// Pass duration in seconds, by pass kind.
pub static PASS_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "paige_search_pass_duration_seconds",
            "Duration of search passes",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["kind"],
    )
    .unwrap()
});

/// Wanted items evaluated, across all passes.
pub static ITEMS_SEARCHED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("paige_items_searched_total", "Total wanted items searched").unwrap()
});

/// Successful snatches, across all passes.
pub static ITEMS_SNATCHED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("paige_items_snatched_total", "Total wanted items snatched").unwrap()
});

/// Final outcome of each per-item decision.
pub static SNATCH_OUTCOMES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("paige_snatch_outcomes_total", "Per-item snatch outcomes"),
        &["outcome"],
    )
    .unwrap()
});

/// Distribution of best-match scores. Penalties can push a score below
/// zero, hence the negative bucket.
pub static MATCH_SCORE: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new("paige_match_score", "Best-match score distribution")
            .buckets(vec![-10.0, 0.0, 25.0, 50.0, 70.0, 80.0, 90.0, 95.0, 100.0]),
    )
    .unwrap()
});

/// Get all metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(SEARCH_PASSES.clone()),
        Box::new(PASS_DURATION.clone()),
        Box::new(ITEMS_SEARCHED.clone()),
        Box::new(ITEMS_SNATCHED.clone()),
        Box::new(SNATCH_OUTCOMES.clone()),
        Box::new(MATCH_SCORE.clone()),
    ]
}
