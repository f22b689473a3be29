//! Post-processing trigger.

/// Kicks the post-processing job after a successful snatch. The job
/// scans the download directory on its own schedule and uses the
/// `LL.(<id>)` marker in download titles to find the owning wanted
/// item; the engine only nudges it to run soon.
pub trait PostProcessScheduler: Send + Sync {
    fn schedule_post_process(&self);
}
