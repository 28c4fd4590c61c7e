//! Storage traits for the journal, offline queue, and config.
//!
//! The storage layer is split into focused traits:
//! - `JournalStore`: bounded dedup journal of processed records
//! - `QueueStore`: durable list of records awaiting remote sync
//! - `ConfigStore`: process-wide settings
//! - `TrackerStore`: composite trait combining all three
//!
//! Stores are the sole owners of their persisted collections; the
//! orchestrator only goes through these operations.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::config::TrackerConfig;
use crate::types::record::{JobRecord, JournalEntry, QueueEntry};

/// Maximum number of journal entries kept; inserting past the bound evicts
/// the oldest-inserted entry.
pub const JOURNAL_CAPACITY: usize = 100;

/// Bounded, append-only journal of already-processed records.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Insert unless the record's identity key is already present.
    ///
    /// Returns false without mutating anything on a duplicate. On insert,
    /// enforces [`JOURNAL_CAPACITY`] by evicting the oldest-inserted entry,
    /// and completes only after the write is durable.
    async fn save_if_absent(&self, record: &JobRecord) -> Result<bool>;

    /// Whether an identity key is already recorded.
    async fn contains(&self, key: &str) -> Result<bool>;

    /// Most recent records first, at most `limit`. Non-destructive.
    async fn recent(&self, limit: usize) -> Result<Vec<JobRecord>>;

    /// Every journal entry, in insertion order.
    async fn entries(&self) -> Result<Vec<JournalEntry>>;
}

/// Durable holding area for records that failed remote sync.
#[async_trait]
pub trait QueueStore: Send + Sync {
    /// Append unconditionally. No dedup at this layer: the same record may
    /// appear twice if it fails remote sync more than once between drains.
    async fn enqueue(&self, record: &JobRecord) -> Result<()>;

    /// The full queue in enqueue order.
    async fn queued(&self) -> Result<Vec<QueueEntry>>;

    /// Overwrite the queue with the still-pending entries.
    async fn replace(&self, entries: Vec<QueueEntry>) -> Result<()>;

    /// Empty the queue unconditionally.
    async fn clear(&self) -> Result<()>;
}

/// Settings persistence.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored config, or the defaults when nothing is stored yet.
    async fn load_config(&self) -> Result<TrackerConfig>;

    /// Persist a config change.
    async fn store_config(&self, config: &TrackerConfig) -> Result<()>;
}

/// Composite storage trait the orchestrator is generic over.
pub trait TrackerStore: JournalStore + QueueStore + ConfigStore {}

// Blanket implementation: anything implementing all three is a TrackerStore
impl<T: JournalStore + QueueStore + ConfigStore> TrackerStore for T {}
