//! Tracker configuration.
//!
//! Loaded from the config store at the start of each operation that needs it
//! and never cached across await points, so a concurrent settings change is
//! picked up by the next operation rather than racing this one.

use serde::{Deserialize, Serialize};

/// Where save requests land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Journal only; nothing leaves the device
    #[default]
    Local,
    /// Journal for dedup, then append to the configured spreadsheet
    Sheets,
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerConfig {
    pub storage_mode: StorageMode,

    /// Target spreadsheet; required only in [`StorageMode::Sheets`].
    pub sheet_id: String,

    /// Display labels per field. Informational: the column order itself is
    /// fixed (title, company, date, link, status, record time).
    pub column_mapping: ColumnMapping,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::Local,
            sheet_id: String::new(),
            column_mapping: ColumnMapping::default(),
        }
    }
}

impl TrackerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the storage mode.
    pub fn with_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    /// Set the target spreadsheet id.
    pub fn with_sheet_id(mut self, sheet_id: impl Into<String>) -> Self {
        self.sheet_id = sheet_id.into();
        self
    }

    /// A drain has somewhere to deliver to when a sheet id is configured.
    pub fn has_remote_target(&self) -> bool {
        !self.sheet_id.trim().is_empty()
    }
}

/// Field-to-label mapping used for the CSV header row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnMapping {
    pub job_title: String,
    pub company: String,
    pub application_date: String,
    pub jd_link: String,
    pub status: String,
    pub record_time: String,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            job_title: "工作名称".to_string(),
            company: "公司名称".to_string(),
            application_date: "申请日期".to_string(),
            jd_link: "JD链接".to_string(),
            status: "申请状态".to_string(),
            record_time: "记录时间".to_string(),
        }
    }
}

impl ColumnMapping {
    /// Labels in the fixed column order.
    pub fn labels(&self) -> [&str; 6] {
        [
            &self.job_title,
            &self.company,
            &self.application_date,
            &self.jd_link,
            &self.status,
            &self.record_time,
        ]
    }
}
