//! CSV export of the combined job history.
//!
//! Output is UTF-8 with a BOM prefix (spreadsheet tools sniff it for the
//! encoding), `\n`-terminated rows, RFC-4180 quoting. The header row uses
//! the configured column labels; the column order itself is fixed.

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};
use crate::types::config::ColumnMapping;
use crate::types::record::JobRecord;

const BOM: &str = "\u{feff}";

/// Serialize records to a CSV document.
pub fn to_csv(jobs: &[JobRecord], mapping: &ColumnMapping) -> Result<String> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    writer
        .write_record(mapping.labels())
        .map_err(|e| TrackerError::Export(e.to_string()))?;

    for job in jobs {
        writer
            .write_record(job.to_row())
            .map_err(|e| TrackerError::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TrackerError::Export(e.to_string()))?;
    let body = String::from_utf8(bytes).map_err(|e| TrackerError::Export(e.to_string()))?;

    Ok(format!("{BOM}{body}"))
}

/// Default download filename for an export taken on `date`.
pub fn default_filename(date: NaiveDate) -> String {
    format!("job-tracker-{date}.csv")
}
