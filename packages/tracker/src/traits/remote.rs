//! Remote persistence seam the orchestrator drives.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::record::JobRecord;

/// A remote destination for records.
///
/// The production implementation is [`crate::sync::SheetsSink`]; tests use
/// [`crate::testing::MockRemote`]. Error kinds matter: a `Network` failure
/// routes the record to the offline queue, anything else is surfaced.
#[async_trait]
pub trait RemoteSink: Send + Sync {
    /// Check the target is reachable and accessible before appending.
    async fn validate(&self, sheet_id: &str) -> Result<()>;

    /// Append one record to the remote target.
    async fn append(&self, sheet_id: &str, record: &JobRecord) -> Result<()>;

    /// Run the interactive account handshake.
    async fn authenticate(&self) -> Result<()>;
}
