//! Sync orchestration: the save state machine, the Sheets sink, and the
//! periodic offline-queue drain.

pub mod orchestrator;
pub mod sheets_sink;

pub use orchestrator::{SaveOutcome, Tracker};
pub use sheets_sink::SheetsSink;

use std::time::Duration;
use tracing::warn;

use crate::traits::remote::RemoteSink;
use crate::traits::store::TrackerStore;

/// Fixed drain interval.
pub const SYNC_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Drain the offline queue now, then again on every [`SYNC_INTERVAL`] tick.
///
/// The first drain runs immediately, covering the boot-time replay. Drain
/// failures are logged, never propagated: they only affect what is still
/// queued for the next attempt. Runs until the task is dropped.
pub async fn run_sync_loop<S: TrackerStore, R: RemoteSink>(tracker: &Tracker<S, R>) {
    let mut ticker = tokio::time::interval(SYNC_INTERVAL);
    loop {
        ticker.tick().await;
        if let Err(e) = tracker.drain_queue().await {
            warn!(error = %e, "offline queue drain failed");
        }
    }
}
