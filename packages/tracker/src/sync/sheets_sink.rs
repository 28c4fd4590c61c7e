//! Google Sheets implementation of the remote sink.

use async_trait::async_trait;
use sheets_client::SheetsClient;
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::traits::remote::RemoteSink;
use crate::types::record::JobRecord;

/// Appends records to a spreadsheet via [`SheetsClient`].
///
/// The six record fields map, in fixed order, to columns A–F of the
/// spreadsheet's first worksheet.
pub struct SheetsSink {
    client: SheetsClient,
}

impl SheetsSink {
    pub fn new(client: SheetsClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteSink for SheetsSink {
    async fn validate(&self, sheet_id: &str) -> Result<()> {
        match self.client.metadata(sheet_id).await {
            Ok(_) => Ok(()),
            // Transport failures keep their class so the caller can queue
            Err(e) if e.is_network() => Err(e.into()),
            Err(e) => {
                debug!(sheet_id, error = %e, "spreadsheet access check failed");
                Err(TrackerError::Validation(
                    "cannot access the spreadsheet: check the sheet id and sharing".into(),
                ))
            }
        }
    }

    async fn append(&self, sheet_id: &str, record: &JobRecord) -> Result<()> {
        let sheet_name = self.client.first_sheet_name(sheet_id).await;
        let range = format!("{sheet_name}!A:F");

        self.client
            .append_row(sheet_id, &range, &record.to_row())
            .await?;
        Ok(())
    }

    async fn authenticate(&self) -> Result<()> {
        self.client.authenticate().await.map_err(Into::into)
    }
}
