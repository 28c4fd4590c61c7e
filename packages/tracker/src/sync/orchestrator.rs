//! Save orchestration: dedup gate, local/remote routing, offline queuing.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{Result, TrackerError};
use crate::traits::notify::{LogNotifier, Notice, Notifier};
use crate::traits::remote::RemoteSink;
use crate::traits::store::TrackerStore;
use crate::types::config::StorageMode;
use crate::types::record::{JobRecord, QueueEntry};

/// Terminal state of a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Stored in the local journal only
    Local,
    /// Appended to the remote spreadsheet
    Remote,
    /// Remote unreachable: journaled and queued for a later drain
    Queued,
}

/// The sync orchestrator.
///
/// Owns no collections itself: all persisted state goes through the store's
/// operations, all remote traffic through the sink. Config is loaded fresh
/// per call, never cached across await points.
pub struct Tracker<S, R> {
    store: S,
    remote: R,
    notifier: Arc<dyn Notifier>,
}

impl<S: TrackerStore, R: RemoteSink> Tracker<S, R> {
    pub fn new(store: S, remote: R) -> Self {
        Self {
            store,
            remote,
            notifier: Arc::new(LogNotifier),
        }
    }

    /// Replace the notification sink.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Save one record.
    ///
    /// The dedup gate runs first: a record whose identity key is already
    /// journaled terminates with [`TrackerError::Duplicate`] (informational,
    /// nothing was mutated). In local mode that insert is the whole job. In
    /// sheets mode a network-classed remote failure routes the record to the
    /// offline queue and reports [`SaveOutcome::Queued`] instead of failing;
    /// every other remote failure propagates.
    pub async fn save(&self, record: &JobRecord) -> Result<SaveOutcome> {
        if !record.is_valid() {
            return Err(TrackerError::Validation(
                "a job record needs a title and a link".into(),
            ));
        }

        let config = self.store.load_config().await?;

        if !self.store.save_if_absent(record).await? {
            debug!(key = %record.identity_key(), "duplicate record, skipping");
            return Err(TrackerError::Duplicate);
        }

        match config.storage_mode {
            StorageMode::Local => {
                self.notifier.notify(&Notice::SavedLocally {
                    job_title: record.job_title.clone(),
                });
                Ok(SaveOutcome::Local)
            }
            StorageMode::Sheets => {
                if !config.has_remote_target() {
                    return Err(TrackerError::Validation(
                        "no sheet id configured: set one or switch to local storage".into(),
                    ));
                }

                match self.remote_attempt(&config.sheet_id, record).await {
                    Ok(()) => {
                        self.notifier.notify(&Notice::SavedRemotely {
                            job_title: record.job_title.clone(),
                        });
                        Ok(SaveOutcome::Remote)
                    }
                    Err(e) if e.is_network() => {
                        warn!(error = %e, "remote save failed, queuing for later sync");
                        self.store.enqueue(record).await?;
                        self.notifier.notify(&Notice::QueuedOffline {
                            job_title: record.job_title.clone(),
                        });
                        Ok(SaveOutcome::Queued)
                    }
                    Err(e) => Err(e),
                }
            }
        }
    }

    /// Validate access, then append. Shared by the save path and the drain.
    async fn remote_attempt(&self, sheet_id: &str, record: &JobRecord) -> Result<()> {
        self.remote.validate(sheet_id).await?;
        self.remote.append(sheet_id, record).await
    }

    /// Replay the offline queue through the remote path.
    ///
    /// Entries are attempted in enqueue order; an entry leaves the queue
    /// only on explicit success. The stored queue is rewritten only when at
    /// least one entry got through, so a fully-failing drain leaves storage
    /// untouched. Never called concurrently with itself (single logical
    /// writer per §5 of the concurrency model).
    pub async fn drain_queue(&self) -> Result<()> {
        let queue = self.store.queued().await?;
        if queue.is_empty() {
            return Ok(());
        }

        let config = self.store.load_config().await?;
        if !config.has_remote_target() {
            debug!("no remote target configured, leaving queue untouched");
            return Ok(());
        }

        let total = queue.len();
        let mut failed: Vec<QueueEntry> = Vec::new();

        for entry in queue {
            match self.remote_attempt(&config.sheet_id, &entry.data).await {
                Ok(()) => {
                    debug!(key = %entry.data.identity_key(), "queued record synced");
                }
                Err(e) => {
                    // Kept regardless of error class: queued data is only
                    // dropped on confirmed delivery
                    debug!(key = %entry.data.identity_key(), error = %e, "queued record still failing");
                    failed.push(entry);
                }
            }
        }

        if failed.len() < total {
            info!(
                synced = total - failed.len(),
                remaining = failed.len(),
                "offline queue drained"
            );
            self.store.replace(failed).await?;
        }

        Ok(())
    }

    /// Whether an identity key is already journaled.
    pub async fn check_duplicate(&self, key: &str) -> Result<bool> {
        self.store.contains(key).await
    }

    /// The most recently journaled records, newest first.
    pub async fn recent_jobs(&self, limit: usize) -> Result<Vec<JobRecord>> {
        self.store.recent(limit).await
    }

    /// Journal plus offline queue, deduplicated by identity key (the journal
    /// copy wins), newest record time first.
    pub async fn all_jobs(&self) -> Result<Vec<JobRecord>> {
        let mut jobs: Vec<JobRecord> = self
            .store
            .entries()
            .await?
            .into_iter()
            .map(|entry| entry.data)
            .collect();

        for entry in self.store.queued().await? {
            let key = entry.data.identity_key();
            if !jobs.iter().any(|job| job.identity_key() == key) {
                jobs.push(entry.data);
            }
        }

        jobs.sort_by(|a, b| b.record_timestamp().cmp(&a.record_timestamp()));
        Ok(jobs)
    }

    pub async fn config(&self) -> Result<crate::types::config::TrackerConfig> {
        self.store.load_config().await
    }

    pub async fn save_config(&self, config: &crate::types::config::TrackerConfig) -> Result<()> {
        self.store.store_config(config).await
    }

    /// Run the interactive account handshake on the remote sink.
    pub async fn authenticate(&self) -> Result<()> {
        self.remote.authenticate().await
    }
}
