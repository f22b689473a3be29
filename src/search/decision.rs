//! Snatch decision.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::downloader::{DownloadAdapter, SnatchRequest};
use crate::library::{format_timestamp, DownloadSink, WantedItem, WantedSource};
use crate::matcher::MatchResult;
use crate::metrics;
use crate::notify::{SnatchEvent, SnatchNotifier};
use crate::postprocess::PostProcessScheduler;
use crate::search::types::{SearchError, SnatchOutcome};

/// Turns a ranked best match into a persisted, submitted snatch.
///
/// The already-snatched check is an optimistic read immediately before
/// the write: two concurrent passes of different kinds can rank the same
/// item, and the loser of the race sees `AlreadySnatched` here. A narrow
/// window between the read and `mark_snatched` remains open; a duplicate
/// slipping through costs one redundant download, which post-processing
/// discards when the item is already satisfied.
pub struct SnatchDecision {
    wanted: Arc<dyn WantedSource>,
    sink: Arc<dyn DownloadSink>,
    adapter: Arc<dyn DownloadAdapter>,
    notifier: Arc<dyn SnatchNotifier>,
    post_process: Arc<dyn PostProcessScheduler>,
}

impl SnatchDecision {
    pub fn new(
        wanted: Arc<dyn WantedSource>,
        sink: Arc<dyn DownloadSink>,
        adapter: Arc<dyn DownloadAdapter>,
        notifier: Arc<dyn SnatchNotifier>,
        post_process: Arc<dyn PostProcessScheduler>,
    ) -> Self {
        Self { wanted, sink, adapter, notifier, post_process }
    }

    /// Decide the outcome for one item given its best match, if any.
    ///
    /// Store failures are fatal; adapter and notifier failures map to
    /// `SnatchFailed` and a log line respectively.
    pub async fn decide(
        &self,
        item: &WantedItem,
        best: Option<&MatchResult>,
        match_ratio: u32,
    ) -> Result<SnatchOutcome, SearchError> {
        let outcome = self.decide_inner(item, best, match_ratio).await?;
        metrics::SNATCH_OUTCOMES.with_label_values(&[outcome.as_str()]).inc();
        Ok(outcome)
    }

    async fn decide_inner(
        &self,
        item: &WantedItem,
        best: Option<&MatchResult>,
        match_ratio: u32,
    ) -> Result<SnatchOutcome, SearchError> {
        let Some(best) = best else {
            return Ok(SnatchOutcome::NotFound);
        };
        metrics::MATCH_SCORE.observe(best.score);

        if best.score < f64::from(match_ratio) {
            return Ok(SnatchOutcome::BelowThreshold);
        }

        if self.wanted.is_already_snatched(&item.id)? {
            info!(
                id = %item.id,
                title = %item.title,
                "already snatched elsewhere, skipping duplicate download"
            );
            return Ok(SnatchOutcome::AlreadySnatched);
        }

        // Record first so the attempt survives a crash mid-snatch.
        self.sink.upsert_download(&best.proposed)?;

        let request = SnatchRequest::new(
            best.proposed.mode,
            &item.id,
            &best.proposed.title,
            &best.proposed.source_url,
        );
        let accepted = match self.adapter.snatch(&request).await {
            Ok(true) => true,
            Ok(false) => {
                warn!(
                    adapter = self.adapter.name(),
                    title = %best.proposed.title,
                    "download client declined the snatch"
                );
                false
            }
            Err(e) => {
                warn!(
                    adapter = self.adapter.name(),
                    title = %best.proposed.title,
                    "snatch failed: {}",
                    e
                );
                false
            }
        };
        if !accepted {
            // The record stays Skipped; the item resurfaces next pass.
            return Ok(SnatchOutcome::SnatchFailed);
        }

        self.sink.mark_snatched(&item.id, &best.proposed.source_url)?;

        let event = SnatchEvent {
            title: best.proposed.title.clone(),
            provider: best.proposed.provider.clone(),
            at: format_timestamp(Utc::now()),
        };
        if let Err(e) = self.notifier.notify_snatch(&event).await {
            warn!(notifier = self.notifier.name(), "snatch notification failed: {}", e);
        }
        self.post_process.schedule_post_process();

        info!(
            title = %best.proposed.title,
            provider = %best.proposed.provider,
            score = best.score,
            "snatched"
        );
        Ok(SnatchOutcome::Snatched)
    }
}
