//! Typed errors for the tracking pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`). The variants mirror
//! how callers route failures: `Network` means "queue it and retry later",
//! `Duplicate` is an informational skip, everything else is surfaced as-is.

use thiserror::Error;

/// Result type alias for tracker operations.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Errors that can occur across the extraction-and-sync pipeline.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Missing required config or record field
    #[error("validation error: {0}")]
    Validation(String),

    /// Token missing, expired, or refresh failed
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Transport-level failure; the record is eligible for the offline queue
    #[error("network error: {0}")]
    Network(String),

    /// Remote API rejected the call with a classified message
    #[error("remote API error ({status}): {message}")]
    RemoteApi { status: u16, message: String },

    /// Identity key already recorded; not a failure from the user's view
    #[error("this job is already recorded, skipping duplicate")]
    Duplicate,

    /// Storage backend failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// CSV serialization failed
    #[error("export error: {0}")]
    Export(String),

    /// JSON (de)serialization at the storage boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrackerError {
    /// Whether a failed remote save should be routed to the offline queue.
    pub fn is_network(&self) -> bool {
        matches!(self, TrackerError::Network(_))
    }

    /// Wrap a backend error as a storage failure.
    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        TrackerError::Storage(err.into())
    }
}

impl From<sheets_client::SheetsError> for TrackerError {
    fn from(err: sheets_client::SheetsError) -> Self {
        use sheets_client::SheetsError;
        match err {
            SheetsError::Validation(msg) => TrackerError::Validation(msg),
            SheetsError::Auth(msg) => TrackerError::Authentication(msg),
            SheetsError::Network(msg) => TrackerError::Network(msg),
            SheetsError::Api { status, message } => TrackerError::RemoteApi { status, message },
            // A garbled response body usually means a broken transport or
            // intercepting proxy; retrying later is the safe route.
            SheetsError::Parse(msg) => TrackerError::Network(msg),
        }
    }
}
