//! Search pass orchestration.
//!
//! One pass polls a candidate source once, then walks every wanted item
//! against the polled rows: rank, decide, snatch. When the full title
//! finds nothing and it carries a parenthesized suffix, a single retry
//! with the truncated title follows, so "The Long Road (Unabridged)"
//! still matches releases that drop the edition note.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::downloader::DownloadAdapter;
use crate::library::{
    DownloadSink, FailureBlacklist, WantedFilter, WantedItem, WantedSource, WantedStatus,
};
use crate::matcher::{ranker, MatchProfile};
use crate::metrics;
use crate::notify::SnatchNotifier;
use crate::postprocess::PostProcessScheduler;
use crate::providers::{dedup_candidates, Candidate, CandidateSource};
use crate::scheduler::TaskRegistry;
use crate::search::decision::SnatchDecision;
use crate::search::types::{PassSummary, SearchError, SearchKind, SnatchOutcome};

/// Drives one search pass: poll candidates, rank them against every
/// wanted item, snatch the winners.
pub struct SearchRunner {
    config: SearchConfig,
    wanted: Arc<dyn WantedSource>,
    blacklist: Arc<dyn FailureBlacklist>,
    decision: SnatchDecision,
    tasks: TaskRegistry,
}

impl SearchRunner {
    pub fn new(
        config: SearchConfig,
        wanted: Arc<dyn WantedSource>,
        blacklist: Arc<dyn FailureBlacklist>,
        sink: Arc<dyn DownloadSink>,
        adapter: Arc<dyn DownloadAdapter>,
        notifier: Arc<dyn SnatchNotifier>,
        post_process: Arc<dyn PostProcessScheduler>,
        tasks: TaskRegistry,
    ) -> Self {
        let decision =
            SnatchDecision::new(Arc::clone(&wanted), sink, adapter, notifier, post_process);
        Self { config, wanted, blacklist, decision, tasks }
    }

    /// Run one pass of `kind` over every wanted item, using candidates
    /// polled once from `source`. Refuses to overlap a pass of the same
    /// kind; store and provider failures abort the pass.
    pub async fn run_pass(
        &self,
        kind: SearchKind,
        source: &dyn CandidateSource,
    ) -> Result<PassSummary, SearchError> {
        let Some(_guard) = self.tasks.try_begin(kind.task_name()) else {
            return Err(SearchError::PassInFlight(kind.task_name()));
        };
        let started = Instant::now();

        let polled = source.poll().await?;
        let candidates = dedup_candidates(polled);
        debug!(
            kind = kind.as_str(),
            source = source.name(),
            candidates = candidates.len(),
            "polled candidates"
        );

        let filter = WantedFilter::new().with_status(WantedStatus::Wanted);
        let items = self.wanted.list_wanted(&filter)?;

        let mut summary = PassSummary::default();
        for item in &items {
            summary.searched += 1;
            let outcome = self.search_item(item, &candidates).await?;
            if outcome == SnatchOutcome::Snatched {
                summary.snatched += 1;
            }
        }

        metrics::SEARCH_PASSES.with_label_values(&[kind.as_str()]).inc();
        metrics::PASS_DURATION
            .with_label_values(&[kind.as_str()])
            .observe(started.elapsed().as_secs_f64());
        metrics::ITEMS_SEARCHED.inc_by(u64::from(summary.searched));
        metrics::ITEMS_SNATCHED.inc_by(u64::from(summary.snatched));
        info!(
            kind = kind.as_str(),
            searched = summary.searched,
            snatched = summary.snatched,
            "search pass complete"
        );

        Ok(summary)
    }

    /// Rank and decide for one item: the full title first, then at most
    /// one retry with the text before the first parenthesis.
    async fn search_item(
        &self,
        item: &WantedItem,
        candidates: &[Candidate],
    ) -> Result<SnatchOutcome, SearchError> {
        let profile = self.config.profile_for(item.media_type);

        let outcome = self.attempt(item, &item.title, candidates, &profile).await?;
        if !matches!(outcome, SnatchOutcome::NotFound | SnatchOutcome::BelowThreshold) {
            return Ok(outcome);
        }

        match shortened_title(&item.title) {
            Some(short) => {
                debug!(title = %item.title, retry = %short, "retrying with shortened title");
                self.attempt(item, &short, candidates, &profile).await
            }
            None => Ok(outcome),
        }
    }

    async fn attempt(
        &self,
        item: &WantedItem,
        title: &str,
        candidates: &[Candidate],
        profile: &MatchProfile,
    ) -> Result<SnatchOutcome, SearchError> {
        let best = ranker::rank(
            item,
            &item.author_name,
            title,
            candidates,
            profile,
            self.blacklist.as_ref(),
        )?;
        let outcome = self.decision.decide(item, best.as_ref(), profile.match_ratio).await?;

        match outcome {
            SnatchOutcome::BelowThreshold => {
                if let Some(best) = &best {
                    info!(
                        wanted = %item.title,
                        "closest match was {:.0}%: {}",
                        best.score,
                        best.normalized_title
                    );
                }
            }
            SnatchOutcome::NotFound => {
                debug!(wanted = %item.title, "no candidates survived for '{}'", title);
            }
            _ => {}
        }
        Ok(outcome)
    }
}

/// Text before the first parenthesis, when truncating leaves something
/// usable that differs from the full title.
fn shortened_title(title: &str) -> Option<String> {
    let idx = title.find('(')?;
    let short = title[..idx].trim();
    if short.is_empty() {
        return None;
    }
    Some(short.to_string())
}
