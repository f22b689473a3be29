//! SQLite-backed library store.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use tracing::debug;
use uuid::Uuid;

use super::store::{DownloadSink, FailureBlacklist, LibraryError, WantedSource};
use super::types::{
    DownloadRecord, DownloadStatus, MediaType, NewWantedItem, WantedFilter, WantedItem,
    WantedStatus,
};
use crate::providers::DownloadKind;

/// SQLite store for wanted items and download records.
///
/// A single connection behind a mutex; the engine's write volume is a
/// handful of rows per pass.
pub struct SqliteLibrary {
    conn: Mutex<Connection>,
}

impl SqliteLibrary {
    /// Open (or create) the database at `path` and apply the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, LibraryError> {
        let conn = Connection::open(path)?;
        let library = Self { conn: Mutex::new(conn) };
        library.initialize_schema()?;
        Ok(library)
    }

    /// In-memory database, for tests.
    pub fn in_memory() -> Result<Self, LibraryError> {
        let conn = Connection::open_in_memory()?;
        let library = Self { conn: Mutex::new(conn) };
        library.initialize_schema()?;
        Ok(library)
    }

    fn initialize_schema(&self) -> Result<(), LibraryError> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS wanted_items (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                subtitle TEXT,
                author_name TEXT NOT NULL,
                media_type TEXT NOT NULL,
                status TEXT NOT NULL,
                added_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_wanted_status ON wanted_items(status);
            CREATE INDEX IF NOT EXISTS idx_wanted_media_type ON wanted_items(media_type);

            CREATE TABLE IF NOT EXISTS downloads (
                source_url TEXT PRIMARY KEY,
                wanted_id TEXT NOT NULL,
                title TEXT NOT NULL,
                provider TEXT NOT NULL,
                requested_at TEXT NOT NULL,
                size_mb REAL NOT NULL,
                mode TEXT NOT NULL,
                media_type TEXT NOT NULL,
                status TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_downloads_wanted_id ON downloads(wanted_id);
            CREATE INDEX IF NOT EXISTS idx_downloads_status ON downloads(status);
            "#,
        )?;
        Ok(())
    }

    /// Register a new wanted item with status `Wanted`.
    pub fn add_wanted(&self, new: NewWantedItem) -> Result<WantedItem, LibraryError> {
        let item = WantedItem {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            subtitle: new.subtitle,
            author_name: new.author_name,
            media_type: new.media_type,
            status: WantedStatus::Wanted,
            added_at: Utc::now(),
        };
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO wanted_items (id, title, subtitle, author_name, media_type, status, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                item.id,
                item.title,
                item.subtitle,
                item.author_name,
                item.media_type.as_str(),
                item.status.as_str(),
                item.added_at.to_rfc3339(),
            ],
        )?;
        debug!(id = %item.id, title = %item.title, "registered wanted item");
        Ok(item)
    }

    /// Fetch one wanted item by id.
    pub fn get_wanted(&self, id: &str) -> Result<Option<WantedItem>, LibraryError> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT id, title, subtitle, author_name, media_type, status, added_at
             FROM wanted_items WHERE id = ?1",
            params![id],
            row_to_wanted,
        );
        match result {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Update the status of a wanted item.
    pub fn set_wanted_status(&self, id: &str, status: WantedStatus) -> Result<(), LibraryError> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "UPDATE wanted_items SET status = ?1 WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        if rows == 0 {
            return Err(LibraryError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Fetch one download record by source URL.
    pub fn get_download(&self, source_url: &str) -> Result<Option<DownloadRecord>, LibraryError> {
        let conn = self.conn.lock().unwrap();
        let result = conn.query_row(
            "SELECT source_url, wanted_id, title, provider, requested_at, size_mb, mode, media_type, status
             FROM downloads WHERE source_url = ?1",
            params![source_url],
            row_to_download,
        );
        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

impl WantedSource for SqliteLibrary {
    fn list_wanted(&self, filter: &WantedFilter) -> Result<Vec<WantedItem>, LibraryError> {
        let (where_clause, mut params) = build_where_clause(filter);
        let limit_index = params.len() + 1;
        params.push(Box::new(filter.limit.map(i64::from).unwrap_or(-1)));
        let sql = format!(
            "SELECT id, title, subtitle, author_name, media_type, status, added_at
             FROM wanted_items{} ORDER BY added_at ASC, id ASC LIMIT ?{}",
            where_clause, limit_index
        );

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(&sql)?;
        let items = stmt
            .query_map(rusqlite::params_from_iter(params), row_to_wanted)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    fn is_already_snatched(&self, wanted_id: &str) -> Result<bool, LibraryError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM wanted_items WHERE id = ?1 AND status = ?2",
            params![wanted_id, WantedStatus::Snatched.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl FailureBlacklist for SqliteLibrary {
    fn has_failed(&self, source_url: &str) -> Result<bool, LibraryError> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM downloads WHERE source_url = ?1 AND status = ?2",
            params![source_url, DownloadStatus::Failed.as_str()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }
}

impl DownloadSink for SqliteLibrary {
    fn upsert_download(&self, record: &DownloadRecord) -> Result<(), LibraryError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO downloads (source_url, wanted_id, title, provider, requested_at, size_mb, mode, media_type, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(source_url) DO UPDATE SET
                 wanted_id = excluded.wanted_id,
                 title = excluded.title,
                 provider = excluded.provider,
                 requested_at = excluded.requested_at,
                 size_mb = excluded.size_mb,
                 mode = excluded.mode,
                 media_type = excluded.media_type,
                 status = excluded.status",
            params![
                record.source_url,
                record.wanted_id,
                record.title,
                record.provider,
                record.requested_at,
                record.size_mb,
                record.mode.as_str(),
                record.media_type.as_str(),
                record.status.as_str(),
            ],
        )?;
        Ok(())
    }

    fn mark_snatched(&self, wanted_id: &str, source_url: &str) -> Result<(), LibraryError> {
        let conn = self.conn.lock().unwrap();
        let rows = conn.execute(
            "UPDATE wanted_items SET status = ?1 WHERE id = ?2",
            params![WantedStatus::Snatched.as_str(), wanted_id],
        )?;
        if rows == 0 {
            return Err(LibraryError::NotFound(wanted_id.to_string()));
        }
        conn.execute(
            "UPDATE downloads SET status = ?1 WHERE source_url = ?2",
            params![DownloadStatus::Snatched.as_str(), source_url],
        )?;
        debug!(wanted_id, source_url, "marked snatched");
        Ok(())
    }
}

fn build_where_clause(filter: &WantedFilter) -> (String, Vec<Box<dyn rusqlite::ToSql>>) {
    let mut clauses: Vec<String> = Vec::new();
    let mut params: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(media_type) = filter.media_type {
        clauses.push(format!("media_type = ?{}", params.len() + 1));
        params.push(Box::new(media_type.as_str().to_string()));
    }
    if let Some(status) = filter.status {
        clauses.push(format!("status = ?{}", params.len() + 1));
        params.push(Box::new(status.as_str().to_string()));
    }

    let where_clause = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    (where_clause, params)
}

fn row_to_wanted(row: &Row<'_>) -> rusqlite::Result<WantedItem> {
    let media_type_str: String = row.get(4)?;
    let status_str: String = row.get(5)?;
    let added_at_str: String = row.get(6)?;
    Ok(WantedItem {
        id: row.get(0)?,
        title: row.get(1)?,
        subtitle: row.get(2)?,
        author_name: row.get(3)?,
        media_type: MediaType::parse(&media_type_str)
            .ok_or_else(|| invalid_column(4, &media_type_str))?,
        status: WantedStatus::parse(&status_str).ok_or_else(|| invalid_column(5, &status_str))?,
        added_at: DateTime::parse_from_rfc3339(&added_at_str)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| invalid_column(6, &added_at_str))?,
    })
}

fn row_to_download(row: &Row<'_>) -> rusqlite::Result<DownloadRecord> {
    let mode_str: String = row.get(6)?;
    let media_type_str: String = row.get(7)?;
    let status_str: String = row.get(8)?;
    Ok(DownloadRecord {
        source_url: row.get(0)?,
        wanted_id: row.get(1)?,
        title: row.get(2)?,
        provider: row.get(3)?,
        requested_at: row.get(4)?,
        size_mb: row.get(5)?,
        mode: DownloadKind::parse(&mode_str).ok_or_else(|| invalid_column(6, &mode_str))?,
        media_type: MediaType::parse(&media_type_str)
            .ok_or_else(|| invalid_column(7, &media_type_str))?,
        status: DownloadStatus::parse(&status_str)
            .ok_or_else(|| invalid_column(8, &status_str))?,
    })
}

fn invalid_column(index: usize, value: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        index,
        rusqlite::types::Type::Text,
        format!("unrecognized value '{}'", value).into(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteLibrary {
        SqliteLibrary::in_memory().expect("Failed to create in-memory store")
    }

    fn create_test_item(store: &SqliteLibrary, author: &str, title: &str) -> WantedItem {
        store
            .add_wanted(NewWantedItem {
                title: title.to_string(),
                subtitle: None,
                author_name: author.to_string(),
                media_type: MediaType::EBook,
            })
            .expect("Failed to add wanted item")
    }

    fn create_test_record(wanted_id: &str, source_url: &str) -> DownloadRecord {
        DownloadRecord {
            source_url: source_url.to_string(),
            wanted_id: wanted_id.to_string(),
            title: "Jane Doe - The Long Road LL.(abc)".to_string(),
            provider: "example-rss".to_string(),
            requested_at: "2024-03-09 07:05:01".to_string(),
            size_mb: 1.5,
            mode: DownloadKind::Torrent,
            media_type: MediaType::EBook,
            status: DownloadStatus::Skipped,
        }
    }

    #[test]
    fn test_add_and_get_wanted() {
        let store = create_test_store();
        let item = create_test_item(&store, "Jane Doe", "The Long Road");

        let fetched = store
            .get_wanted(&item.id)
            .expect("Failed to get wanted item")
            .expect("Item should exist");
        assert_eq!(fetched.title, "The Long Road");
        assert_eq!(fetched.author_name, "Jane Doe");
        assert_eq!(fetched.status, WantedStatus::Wanted);
        assert_eq!(fetched.media_type, MediaType::EBook);
    }

    #[test]
    fn test_get_wanted_missing_returns_none() {
        let store = create_test_store();
        let fetched = store.get_wanted("no-such-id").expect("Query should succeed");
        assert!(fetched.is_none());
    }

    #[test]
    fn test_list_wanted_filters_by_status() {
        let store = create_test_store();
        let a = create_test_item(&store, "Jane Doe", "Book A");
        let b = create_test_item(&store, "Jane Doe", "Book B");
        store
            .set_wanted_status(&a.id, WantedStatus::Have)
            .expect("Failed to update status");

        let wanted = store
            .list_wanted(&WantedFilter::new().with_status(WantedStatus::Wanted))
            .expect("Failed to list");
        assert_eq!(wanted.len(), 1);
        assert_eq!(wanted[0].id, b.id);
    }

    #[test]
    fn test_list_wanted_filters_by_media_type() {
        let store = create_test_store();
        create_test_item(&store, "Jane Doe", "An Ebook");
        store
            .add_wanted(NewWantedItem {
                title: "A Magazine".to_string(),
                subtitle: None,
                author_name: "Editors".to_string(),
                media_type: MediaType::Magazine,
            })
            .expect("Failed to add wanted item");

        let magazines = store
            .list_wanted(&WantedFilter::new().with_media_type(MediaType::Magazine))
            .expect("Failed to list");
        assert_eq!(magazines.len(), 1);
        assert_eq!(magazines[0].title, "A Magazine");
    }

    #[test]
    fn test_list_wanted_respects_limit_and_order() {
        let store = create_test_store();
        let first = create_test_item(&store, "Jane Doe", "First");
        create_test_item(&store, "Jane Doe", "Second");
        create_test_item(&store, "Jane Doe", "Third");

        let all = store.list_wanted(&WantedFilter::new()).expect("Failed to list");
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, first.id, "oldest item should come first");

        let limited = store
            .list_wanted(&WantedFilter::new().with_limit(2))
            .expect("Failed to list");
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_set_wanted_status_missing_is_not_found() {
        let store = create_test_store();
        let err = store
            .set_wanted_status("no-such-id", WantedStatus::Snatched)
            .expect_err("Should fail for missing item");
        assert!(matches!(err, LibraryError::NotFound(_)));
    }

    #[test]
    fn test_upsert_download_inserts_then_updates() {
        let store = create_test_store();
        let item = create_test_item(&store, "Jane Doe", "The Long Road");
        let mut record = create_test_record(&item.id, "http://feeds.example/road.torrent");

        store.upsert_download(&record).expect("Failed to upsert");
        let fetched = store
            .get_download(&record.source_url)
            .expect("Failed to get download")
            .expect("Record should exist");
        assert_eq!(fetched.size_mb, 1.5);
        assert_eq!(fetched.status, DownloadStatus::Skipped);

        record.size_mb = 2.25;
        record.status = DownloadStatus::Failed;
        store.upsert_download(&record).expect("Failed to upsert again");
        let fetched = store
            .get_download(&record.source_url)
            .expect("Failed to get download")
            .expect("Record should exist");
        assert_eq!(fetched.size_mb, 2.25);
        assert_eq!(fetched.status, DownloadStatus::Failed);
    }

    #[test]
    fn test_has_failed_only_for_failed_status() {
        let store = create_test_store();
        let item = create_test_item(&store, "Jane Doe", "The Long Road");
        let mut record = create_test_record(&item.id, "http://feeds.example/road.torrent");

        store.upsert_download(&record).expect("Failed to upsert");
        assert!(!store.has_failed(&record.source_url).expect("Query should succeed"));

        record.status = DownloadStatus::Failed;
        store.upsert_download(&record).expect("Failed to upsert");
        assert!(store.has_failed(&record.source_url).expect("Query should succeed"));

        assert!(!store.has_failed("http://other.example/x").expect("Query should succeed"));
    }

    #[test]
    fn test_mark_snatched_updates_both_tables() {
        let store = create_test_store();
        let item = create_test_item(&store, "Jane Doe", "The Long Road");
        let record = create_test_record(&item.id, "http://feeds.example/road.torrent");
        store.upsert_download(&record).expect("Failed to upsert");

        assert!(!store.is_already_snatched(&item.id).expect("Query should succeed"));
        store
            .mark_snatched(&item.id, &record.source_url)
            .expect("Failed to mark snatched");

        assert!(store.is_already_snatched(&item.id).expect("Query should succeed"));
        let fetched = store
            .get_wanted(&item.id)
            .expect("Failed to get wanted item")
            .expect("Item should exist");
        assert_eq!(fetched.status, WantedStatus::Snatched);
        let download = store
            .get_download(&record.source_url)
            .expect("Failed to get download")
            .expect("Record should exist");
        assert_eq!(download.status, DownloadStatus::Snatched);
    }

    #[test]
    fn test_mark_snatched_missing_item_is_not_found() {
        let store = create_test_store();
        let err = store
            .mark_snatched("no-such-id", "http://x")
            .expect_err("Should fail for missing item");
        assert!(matches!(err, LibraryError::NotFound(_)));
    }

    #[test]
    fn test_file_backed_store_persists() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("library.db");

        let id = {
            let store = SqliteLibrary::new(&path).expect("Failed to create store");
            create_test_item(&store, "Jane Doe", "The Long Road").id
        };

        let reopened = SqliteLibrary::new(&path).expect("Failed to reopen store");
        let fetched = reopened
            .get_wanted(&id)
            .expect("Failed to get wanted item")
            .expect("Item should survive reopen");
        assert_eq!(fetched.title, "The Long Road");
    }
}
