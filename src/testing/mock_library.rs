//! Mock library store for testing.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::library::{
    DownloadRecord, DownloadSink, FailureBlacklist, LibraryError, WantedFilter, WantedItem,
    WantedSource,
};

/// In-memory implementation of the store traits.
///
/// Provides controllable behavior for testing:
/// - Seed wanted items, snatched ids and failed URLs
/// - Record every upsert and snatch mark for inspection
/// - Inject a one-shot store failure that the next call consumes
#[derive(Debug, Default)]
pub struct MockLibrary {
    wanted: RwLock<Vec<WantedItem>>,
    snatched: RwLock<HashSet<String>>,
    failed_urls: RwLock<HashSet<String>>,
    upserts: RwLock<Vec<DownloadRecord>>,
    marks: RwLock<Vec<(String, String)>>,
    next_error: RwLock<Option<String>>,
}

impl MockLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a wanted item.
    pub fn add_wanted(&self, item: WantedItem) {
        self.wanted.write().unwrap().push(item);
    }

    /// Replace all seeded wanted items.
    pub fn set_wanted(&self, items: Vec<WantedItem>) {
        *self.wanted.write().unwrap() = items;
    }

    /// Mark an id as already snatched by some other search path.
    pub fn set_snatched(&self, wanted_id: &str) {
        self.snatched.write().unwrap().insert(wanted_id.to_string());
    }

    /// Blacklist a source URL as previously failed.
    pub fn add_failed_url(&self, source_url: &str) {
        self.failed_urls.write().unwrap().insert(source_url.to_string());
    }

    /// Make the next store call fail with `Unavailable`.
    pub fn set_next_error(&self, message: &str) {
        *self.next_error.write().unwrap() = Some(message.to_string());
    }

    /// All records passed to `upsert_download`, in call order.
    pub fn recorded_upserts(&self) -> Vec<DownloadRecord> {
        self.upserts.read().unwrap().clone()
    }

    /// All `(wanted_id, source_url)` pairs passed to `mark_snatched`.
    pub fn recorded_marks(&self) -> Vec<(String, String)> {
        self.marks.read().unwrap().clone()
    }

    fn take_error(&self) -> Result<(), LibraryError> {
        match self.next_error.write().unwrap().take() {
            Some(message) => Err(LibraryError::Unavailable(message)),
            None => Ok(()),
        }
    }
}

impl WantedSource for MockLibrary {
    fn list_wanted(&self, filter: &WantedFilter) -> Result<Vec<WantedItem>, LibraryError> {
        self.take_error()?;
        let limit = filter.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let items = self
            .wanted
            .read()
            .unwrap()
            .iter()
            .filter(|item| filter.status.map_or(true, |status| item.status == status))
            .filter(|item| filter.media_type.map_or(true, |media| item.media_type == media))
            .take(limit)
            .cloned()
            .collect();
        Ok(items)
    }

    fn is_already_snatched(&self, wanted_id: &str) -> Result<bool, LibraryError> {
        self.take_error()?;
        Ok(self.snatched.read().unwrap().contains(wanted_id))
    }
}

impl FailureBlacklist for MockLibrary {
    fn has_failed(&self, source_url: &str) -> Result<bool, LibraryError> {
        self.take_error()?;
        Ok(self.failed_urls.read().unwrap().contains(source_url))
    }
}

impl DownloadSink for MockLibrary {
    fn upsert_download(&self, record: &DownloadRecord) -> Result<(), LibraryError> {
        self.take_error()?;
        self.upserts.write().unwrap().push(record.clone());
        Ok(())
    }

    fn mark_snatched(&self, wanted_id: &str, source_url: &str) -> Result<(), LibraryError> {
        self.take_error()?;
        self.snatched.write().unwrap().insert(wanted_id.to_string());
        self.marks
            .write()
            .unwrap()
            .push((wanted_id.to_string(), source_url.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::WantedStatus;
    use crate::testing::fixtures;

    #[test]
    fn test_list_wanted_filters_by_status() {
        let library = MockLibrary::new();
        let mut have = fixtures::wanted_ebook("item-1", "Jane Doe", "Book A");
        have.status = WantedStatus::Have;
        library.add_wanted(have);
        library.add_wanted(fixtures::wanted_ebook("item-2", "Jane Doe", "Book B"));

        let filter = WantedFilter::new().with_status(WantedStatus::Wanted);
        let items = library.list_wanted(&filter).expect("List should succeed");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "item-2");
    }

    #[test]
    fn test_next_error_is_one_shot() {
        let library = MockLibrary::new();
        library.set_next_error("boom");

        let err = library
            .is_already_snatched("item-1")
            .expect_err("First call should fail");
        assert!(matches!(err, LibraryError::Unavailable(_)));

        assert!(!library
            .is_already_snatched("item-1")
            .expect("Second call should succeed"));
    }

    #[test]
    fn test_mark_snatched_flips_is_already_snatched() {
        let library = MockLibrary::new();
        assert!(!library.is_already_snatched("item-1").expect("Query should succeed"));

        library
            .mark_snatched("item-1", "http://x/1")
            .expect("Mark should succeed");
        assert!(library.is_already_snatched("item-1").expect("Query should succeed"));
        assert_eq!(library.recorded_marks().len(), 1);
    }

    #[test]
    fn test_failed_urls() {
        let library = MockLibrary::new();
        library.add_failed_url("http://x/bad");
        assert!(library.has_failed("http://x/bad").expect("Query should succeed"));
        assert!(!library.has_failed("http://x/good").expect("Query should succeed"));
    }
}
