//! User-visible save notifications.
//!
//! The pipeline emits events; rendering them (system notification, toast)
//! is the host surface's job.

use tracing::info;

/// Outcome events worth telling the user about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Stored in the local journal
    SavedLocally { job_title: String },
    /// Appended to the remote spreadsheet
    SavedRemotely { job_title: String },
    /// Remote unreachable; queued for a later sync
    QueuedOffline { job_title: String },
}

/// Sink for [`Notice`] events.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: &Notice);
}

/// Default notifier: structured log lines only.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: &Notice) {
        match notice {
            Notice::SavedLocally { job_title } => info!(%job_title, "saved locally"),
            Notice::SavedRemotely { job_title } => info!(%job_title, "saved to spreadsheet"),
            Notice::QueuedOffline { job_title } => {
                info!(%job_title, "network down, queued for later sync")
            }
        }
    }
}
