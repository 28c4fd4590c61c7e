//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::error::Result;
use crate::traits::store::{ConfigStore, JournalStore, QueueStore, JOURNAL_CAPACITY};
use crate::types::config::TrackerConfig;
use crate::types::record::{JobRecord, JournalEntry, QueueEntry};

/// In-memory journal, queue, and config.
///
/// Useful for testing and development. Not suitable for production as data
/// is lost on restart.
#[derive(Default)]
pub struct MemoryStore {
    journal: RwLock<Vec<JournalEntry>>,
    queue: RwLock<Vec<QueueEntry>>,
    config: RwLock<Option<TrackerConfig>>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of journal entries currently held.
    pub fn journal_len(&self) -> usize {
        self.journal.read().unwrap().len()
    }

    /// Number of queued entries currently held.
    pub fn queue_len(&self) -> usize {
        self.queue.read().unwrap().len()
    }
}

#[async_trait]
impl JournalStore for MemoryStore {
    async fn save_if_absent(&self, record: &JobRecord) -> Result<bool> {
        let key = record.identity_key();
        let mut journal = self.journal.write().unwrap();

        if journal.iter().any(|entry| entry.key == key) {
            return Ok(false);
        }

        journal.push(JournalEntry::new(record.clone()));
        if journal.len() > JOURNAL_CAPACITY {
            journal.remove(0);
        }
        Ok(true)
    }

    async fn contains(&self, key: &str) -> Result<bool> {
        Ok(self.journal.read().unwrap().iter().any(|e| e.key == key))
    }

    async fn recent(&self, limit: usize) -> Result<Vec<JobRecord>> {
        let mut entries = self.journal.read().unwrap().clone();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        Ok(entries.into_iter().map(|e| e.data).collect())
    }

    async fn entries(&self) -> Result<Vec<JournalEntry>> {
        Ok(self.journal.read().unwrap().clone())
    }
}

#[async_trait]
impl QueueStore for MemoryStore {
    async fn enqueue(&self, record: &JobRecord) -> Result<()> {
        self.queue
            .write()
            .unwrap()
            .push(QueueEntry::new(record.clone()));
        Ok(())
    }

    async fn queued(&self) -> Result<Vec<QueueEntry>> {
        Ok(self.queue.read().unwrap().clone())
    }

    async fn replace(&self, entries: Vec<QueueEntry>) -> Result<()> {
        *self.queue.write().unwrap() = entries;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.queue.write().unwrap().clear();
        Ok(())
    }
}

#[async_trait]
impl ConfigStore for MemoryStore {
    async fn load_config(&self) -> Result<TrackerConfig> {
        Ok(self.config.read().unwrap().clone().unwrap_or_default())
    }

    async fn store_config(&self, config: &TrackerConfig) -> Result<()> {
        *self.config.write().unwrap() = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::StorageMode;

    fn record(n: usize) -> JobRecord {
        JobRecord::new(format!("Job {n}"), format!("http://jobs.example/{n}"))
    }

    #[tokio::test]
    async fn test_save_if_absent_dedups() {
        let store = MemoryStore::new();
        let r = record(1);

        assert!(store.save_if_absent(&r).await.unwrap());
        assert!(!store.save_if_absent(&r).await.unwrap());
        assert_eq!(store.journal_len(), 1);
    }

    #[tokio::test]
    async fn test_journal_capacity_evicts_oldest() {
        let store = MemoryStore::new();
        for n in 0..JOURNAL_CAPACITY + 1 {
            assert!(store.save_if_absent(&record(n)).await.unwrap());
        }

        assert_eq!(store.journal_len(), JOURNAL_CAPACITY);

        // The very first insert is gone, the second and the newest remain
        let key0 = record(0).identity_key();
        let key1 = record(1).identity_key();
        let key_last = record(JOURNAL_CAPACITY).identity_key();
        assert!(!store.contains(&key0).await.unwrap());
        assert!(store.contains(&key1).await.unwrap());
        assert!(store.contains(&key_last).await.unwrap());
    }

    #[tokio::test]
    async fn test_recent_orders_and_limits() {
        let store = MemoryStore::new();
        for n in 0..5 {
            store.save_if_absent(&record(n)).await.unwrap();
        }

        let recent = store.recent(3).await.unwrap();
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].job_title, "Job 4");
        assert_eq!(recent[2].job_title, "Job 2");

        assert!(store.recent(0).await.unwrap().is_empty());
        assert_eq!(store.recent(100).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_queue_is_fifo_and_allows_duplicates() {
        let store = MemoryStore::new();
        let r = record(1);
        store.enqueue(&r).await.unwrap();
        store.enqueue(&r).await.unwrap();
        store.enqueue(&record(2)).await.unwrap();

        let queued = store.queued().await.unwrap();
        assert_eq!(queued.len(), 3);
        assert_eq!(queued[0].data.job_title, "Job 1");
        assert_eq!(queued[2].data.job_title, "Job 2");

        store.clear().await.unwrap();
        assert_eq!(store.queue_len(), 0);
    }

    #[tokio::test]
    async fn test_replace_keeps_given_order() {
        let store = MemoryStore::new();
        for n in 0..4 {
            store.enqueue(&record(n)).await.unwrap();
        }

        let mut queued = store.queued().await.unwrap();
        queued.remove(1);
        store.replace(queued).await.unwrap();

        let remaining = store.queued().await.unwrap();
        assert_eq!(remaining.len(), 3);
        assert_eq!(remaining[1].data.job_title, "Job 2");
    }

    #[tokio::test]
    async fn test_config_defaults_until_stored() {
        let store = MemoryStore::new();
        assert_eq!(
            store.load_config().await.unwrap(),
            TrackerConfig::default()
        );

        let config = TrackerConfig::new()
            .with_mode(StorageMode::Sheets)
            .with_sheet_id("abc");
        store.store_config(&config).await.unwrap();
        assert_eq!(store.load_config().await.unwrap(), config);
    }
}
