//! Domain data types.

pub mod config;
pub mod record;

pub use config::{ColumnMapping, StorageMode, TrackerConfig};
pub use record::{JobRecord, JournalEntry, QueueEntry, DEFAULT_STATUS, UNKNOWN_COMPANY};
