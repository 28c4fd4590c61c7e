//! Job-posting extraction and sync pipeline.
//!
//! Detects job-posting pages, extracts structured records via per-site
//! selector strategies, deduplicates against a bounded local journal, and
//! persists either locally or to a remote spreadsheet, queuing records
//! offline when the remote path is down and replaying them on a fixed
//! interval.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tracker::{MemoryStore, SheetsSink, Tracker, Request, handle};
//! use sheets_client::{SheetsClient, StaticTokenProvider};
//! use std::sync::Arc;
//!
//! let client = SheetsClient::new(Arc::new(StaticTokenProvider::new(token)));
//! let tracker = Tracker::new(MemoryStore::new(), SheetsSink::new(client));
//!
//! let response = handle(&tracker, Request::GetRecentJobs).await;
//! ```
//!
//! # Modules
//!
//! - [`extract`] - Page classification and selector-driven field extraction
//! - [`traits`] - Storage, remote-sink, and notifier seams
//! - [`stores`] - Storage implementations (in-memory, SQLite behind `sqlite`)
//! - [`sync`] - Save orchestration, Sheets sink, periodic queue drain
//! - [`service`] - Typed message API for host surfaces
//! - [`export`] - CSV export
//! - [`testing`] - Mock implementations for tests

pub mod error;
pub mod export;
pub mod extract;
pub mod service;
pub mod stores;
pub mod sync;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{Result, TrackerError};
pub use extract::{extract, is_job_page, PageSnapshot, SiteStrategy};
pub use service::{handle, Request, Response};
pub use stores::MemoryStore;
pub use sync::{run_sync_loop, SaveOutcome, SheetsSink, Tracker, SYNC_INTERVAL};
pub use traits::{
    notify::{LogNotifier, Notice, Notifier},
    remote::RemoteSink,
    store::{ConfigStore, JournalStore, QueueStore, TrackerStore, JOURNAL_CAPACITY},
};
pub use types::{
    config::{ColumnMapping, StorageMode, TrackerConfig},
    record::{JobRecord, JournalEntry, QueueEntry, DEFAULT_STATUS, UNKNOWN_COMPANY},
};

#[cfg(feature = "sqlite")]
pub use stores::SqliteStore;
