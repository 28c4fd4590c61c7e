//! Job records and the entries the stores wrap them in.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status stamped on every record at extraction time.
pub const DEFAULT_STATUS: &str = "applied";

/// Sentinel used when no company field could be located.
pub const UNKNOWN_COMPANY: &str = "Unknown";

/// Format of [`JobRecord::record_time`].
const RECORD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One extracted job posting.
///
/// Serialized camelCase so it round-trips the message API's JSON shapes.
/// Two records with the same [identity key](JobRecord::identity_key) are the
/// same job; only the first survives in the journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    pub jd_link: String,
    pub application_date: NaiveDate,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub record_time: String,
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

impl JobRecord {
    /// Create a record stamped with today's date and the current time.
    pub fn new(job_title: impl Into<String>, jd_link: impl Into<String>) -> Self {
        let now = Local::now();
        Self {
            job_title: job_title.into(),
            company: UNKNOWN_COMPANY.to_string(),
            jd_link: jd_link.into(),
            application_date: now.date_naive(),
            status: DEFAULT_STATUS.to_string(),
            record_time: now.format(RECORD_TIME_FORMAT).to_string(),
        }
    }

    /// Set the company name.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Set the record time (tests and replays).
    pub fn with_record_time(mut self, record_time: impl Into<String>) -> Self {
        self.record_time = record_time.into();
        self
    }

    /// Deduplication key: link and title, exact and case-sensitive.
    pub fn identity_key(&self) -> String {
        format!("{}_{}", self.jd_link, self.job_title)
    }

    /// A record needs at least a title and a source link to be stored.
    pub fn is_valid(&self) -> bool {
        !self.job_title.trim().is_empty() && !self.jd_link.trim().is_empty()
    }

    /// Parse `record_time` for sorting; unparseable values sort to the epoch.
    pub fn record_timestamp(&self) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(&self.record_time, RECORD_TIME_FORMAT).unwrap_or_default()
    }

    /// The six spreadsheet/CSV columns, in their fixed order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.job_title.clone(),
            self.company.clone(),
            self.application_date.to_string(),
            self.jd_link.clone(),
            self.status.clone(),
            self.record_time.clone(),
        ]
    }
}

/// A journal entry: the record plus its dedup key and insertion time.
///
/// Never mutated after insert; only appended or evicted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub key: String,
    pub data: JobRecord,
    pub timestamp: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new(record: JobRecord) -> Self {
        Self {
            key: record.identity_key(),
            data: record,
            timestamp: Utc::now(),
        }
    }
}

/// An offline-queue entry awaiting remote sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntry {
    pub data: JobRecord,
    pub timestamp: DateTime<Utc>,
}

impl QueueEntry {
    pub fn new(record: JobRecord) -> Self {
        Self {
            data: record,
            timestamp: Utc::now(),
        }
    }
}
