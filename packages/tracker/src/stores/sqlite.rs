//! SQLite storage implementation.
//!
//! A file-based backend for hosts that want the journal, queue, and config
//! to survive restarts. Records are stored as JSON payloads; insertion order
//! (rowid) drives journal eviction and queue ordering.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;

use crate::error::{Result, TrackerError};
use crate::traits::store::{ConfigStore, JournalStore, QueueStore, JOURNAL_CAPACITY};
use crate::types::config::TrackerConfig;
use crate::types::record::{JobRecord, JournalEntry, QueueEntry};

/// SQLite-backed tracker store.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (and migrate) a store at the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - ephemeral, for tests
    /// - `sqlite://tracker.db?mode=rwc` - file-based, create if missing
    pub async fn new(database_url: &str) -> Result<Self> {
        // Single connection: an in-memory database exists per connection,
        // and the store's writes must observe one schema
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .map_err(TrackerError::storage)?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS journal (
                key TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS queue (
                data TEXT NOT NULL,
                timestamp TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS config (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                data TEXT NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(TrackerError::storage)?;

        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(TrackerError::storage)
}

#[async_trait]
impl JournalStore for SqliteStore {
    async fn save_if_absent(&self, record: &JobRecord) -> Result<bool> {
        let key = record.identity_key();
        let data = serde_json::to_string(record)?;

        let result = sqlx::query(
            "INSERT OR IGNORE INTO journal (key, data, timestamp) VALUES (?, ?, ?)",
        )
        .bind(&key)
        .bind(&data)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(TrackerError::storage)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        // Keep the newest JOURNAL_CAPACITY rows, evict the rest
        sqlx::query(
            "DELETE FROM journal WHERE rowid IN \
             (SELECT rowid FROM journal ORDER BY rowid DESC LIMIT -1 OFFSET ?)",
        )
        .bind(JOURNAL_CAPACITY as i64)
        .execute(&self.pool)
        .await
        .map_err(TrackerError::storage)?;

        Ok(true)
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        let row = sqlx::query("SELECT 1 FROM journal WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(TrackerError::storage)?;
        Ok(row.is_some())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<JobRecord>> {
        let rows = sqlx::query(
            "SELECT data FROM journal ORDER BY timestamp DESC, rowid DESC LIMIT ?",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(TrackerError::storage)?;

        rows.iter()
            .map(|row| Ok(serde_json::from_str(row.get::<&str, _>("data"))?))
            .collect()
    }

    async fn entries(&self) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query("SELECT key, data, timestamp FROM journal ORDER BY rowid ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(TrackerError::storage)?;

        rows.iter()
            .map(|row| {
                Ok(JournalEntry {
                    key: row.get::<String, _>("key"),
                    data: serde_json::from_str(row.get::<&str, _>("data"))?,
                    timestamp: parse_timestamp(row.get::<&str, _>("timestamp"))?,
                })
            })
            .collect()
    }
}

#[async_trait]
impl QueueStore for SqliteStore {
    async fn enqueue(&self, record: &JobRecord) -> Result<()> {
        sqlx::query("INSERT INTO queue (data, timestamp) VALUES (?, ?)")
            .bind(serde_json::to_string(record)?)
            .bind(Utc::now().to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(TrackerError::storage)?;
        Ok(())
    }

    async fn queued(&self) -> Result<Vec<QueueEntry>> {
        let rows = sqlx::query("SELECT data, timestamp FROM queue ORDER BY rowid ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(TrackerError::storage)?;

        rows.iter()
            .map(|row| {
                Ok(QueueEntry {
                    data: serde_json::from_str(row.get::<&str, _>("data"))?,
                    timestamp: parse_timestamp(row.get::<&str, _>("timestamp"))?,
                })
            })
            .collect()
    }

    async fn replace(&self, entries: Vec<QueueEntry>) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(TrackerError::storage)?;

        sqlx::query("DELETE FROM queue")
            .execute(&mut *tx)
            .await
            .map_err(TrackerError::storage)?;

        for entry in &entries {
            sqlx::query("INSERT INTO queue (data, timestamp) VALUES (?, ?)")
                .bind(serde_json::to_string(&entry.data)?)
                .bind(entry.timestamp.to_rfc3339())
                .execute(&mut *tx)
                .await
                .map_err(TrackerError::storage)?;
        }

        tx.commit().await.map_err(TrackerError::storage)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM queue")
            .execute(&self.pool)
            .await
            .map_err(TrackerError::storage)?;
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for SqliteStore {
    async fn load_config(&self) -> Result<TrackerConfig> {
        let row = sqlx::query("SELECT data FROM config WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(TrackerError::storage)?;

        match row {
            Some(row) => Ok(serde_json::from_str(row.get::<&str, _>("data"))?),
            None => Ok(TrackerConfig::default()),
        }
    }

    async fn store_config(&self, config: &TrackerConfig) -> Result<()> {
        sqlx::query(
            "INSERT INTO config (id, data) VALUES (1, ?) \
             ON CONFLICT(id) DO UPDATE SET data = excluded.data",
        )
        .bind(serde_json::to_string(config)?)
        .execute(&self.pool)
        .await
        .map_err(TrackerError::storage)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(n: usize) -> JobRecord {
        JobRecord::new(format!("Job {n}"), format!("http://jobs.example/{n}"))
    }

    #[tokio::test]
    async fn test_journal_dedup_and_capacity() {
        let store = SqliteStore::in_memory().await.unwrap();
        let r = record(1);

        assert!(store.save_if_absent(&r).await.unwrap());
        assert!(!store.save_if_absent(&r).await.unwrap());

        for n in 2..=JOURNAL_CAPACITY + 1 {
            assert!(store.save_if_absent(&record(n)).await.unwrap());
        }

        // Oldest evicted, bound held
        assert!(!store.contains(&record(1).identity_key()).await.unwrap());
        assert_eq!(store.entries().await.unwrap().len(), JOURNAL_CAPACITY);
    }

    #[tokio::test]
    async fn test_queue_round_trip() {
        let store = SqliteStore::in_memory().await.unwrap();
        store.enqueue(&record(1)).await.unwrap();
        store.enqueue(&record(2)).await.unwrap();

        let queued = store.queued().await.unwrap();
        assert_eq!(queued.len(), 2);
        assert_eq!(queued[0].data.job_title, "Job 1");

        store.replace(vec![queued[1].clone()]).await.unwrap();
        let remaining = store.queued().await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].data.job_title, "Job 2");

        store.clear().await.unwrap();
        assert!(store.queued().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_config_persists() {
        let store = SqliteStore::in_memory().await.unwrap();
        assert_eq!(store.load_config().await.unwrap(), TrackerConfig::default());

        let config = TrackerConfig::new().with_sheet_id("abc");
        store.store_config(&config).await.unwrap();
        assert_eq!(store.load_config().await.unwrap(), config);
    }
}
