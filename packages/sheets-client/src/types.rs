//! Wire types for the Sheets v4 API.

use serde::{Deserialize, Serialize};

/// Spreadsheet metadata, trimmed to the worksheet list.
#[derive(Debug, Deserialize)]
pub struct SpreadsheetMeta {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

/// One worksheet inside a spreadsheet.
#[derive(Debug, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
pub struct SheetProperties {
    pub title: String,
}

/// Body for a values append call.
#[derive(Debug, Serialize)]
pub struct AppendRequest {
    pub values: Vec<Vec<String>>,
}

/// Response from a values append call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendResponse {
    pub table_range: Option<String>,
    pub updates: Option<AppendUpdates>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendUpdates {
    pub updated_range: Option<String>,
    pub updated_rows: Option<u32>,
    pub updated_cells: Option<u32>,
}

/// Error envelope the API wraps failures in.
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: Option<String>,
}
