//! In-flight task registry.
//!
//! The surrounding scheduler fires search passes on timers, and a slow
//! pass must not overlap the next firing of the same kind. Exclusion is
//! a mutex-guarded set of task names with RAII release, so a claim
//! cannot leak when a pass errors out early.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Registry of named tasks currently in flight.
#[derive(Debug, Clone, Default)]
pub struct TaskRegistry {
    running: Arc<Mutex<HashSet<String>>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a task name. Returns `None` when a task with this name is
    /// already in flight; otherwise the guard holds the claim until it
    /// is dropped.
    pub fn try_begin(&self, name: &str) -> Option<TaskGuard> {
        let mut running = self.running.lock().unwrap();
        if running.insert(name.to_string()) {
            Some(TaskGuard {
                running: Arc::clone(&self.running),
                name: name.to_string(),
            })
        } else {
            None
        }
    }

    /// Whether a task with this name is in flight.
    pub fn is_running(&self, name: &str) -> bool {
        self.running.lock().unwrap().contains(name)
    }

    /// Names of all in-flight tasks, sorted.
    pub fn running_tasks(&self) -> Vec<String> {
        let mut names: Vec<String> = self.running.lock().unwrap().iter().cloned().collect();
        names.sort();
        names
    }
}

/// Claim on a task name; dropping it releases the name.
#[derive(Debug)]
pub struct TaskGuard {
    running: Arc<Mutex<HashSet<String>>>,
    name: String,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.running.lock().unwrap().remove(&self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_and_release() {
        let registry = TaskRegistry::new();
        assert!(!registry.is_running("search-rss"));

        let guard = registry.try_begin("search-rss").expect("First claim should succeed");
        assert!(registry.is_running("search-rss"));

        drop(guard);
        assert!(!registry.is_running("search-rss"));
    }

    #[test]
    fn test_duplicate_claim_refused() {
        let registry = TaskRegistry::new();
        let _guard = registry.try_begin("search-rss").expect("First claim should succeed");
        assert!(registry.try_begin("search-rss").is_none());
    }

    #[test]
    fn test_reclaim_after_release() {
        let registry = TaskRegistry::new();
        let guard = registry.try_begin("search-rss").expect("First claim should succeed");
        drop(guard);
        assert!(registry.try_begin("search-rss").is_some());
    }

    #[test]
    fn test_distinct_names_are_independent() {
        let registry = TaskRegistry::new();
        let _rss = registry.try_begin("search-rss").expect("Claim should succeed");
        let _nzb = registry.try_begin("search-nzb").expect("Claim should succeed");
        assert_eq!(registry.running_tasks(), vec!["search-nzb", "search-rss"]);
    }

    #[test]
    fn test_clones_share_state() {
        let registry = TaskRegistry::new();
        let clone = registry.clone();
        let _guard = registry.try_begin("search-rss").expect("Claim should succeed");
        assert!(clone.is_running("search-rss"));
        assert!(clone.try_begin("search-rss").is_none());
    }
}
