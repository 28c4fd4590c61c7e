//! Typed errors for the Sheets client.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can route
//! on the error kind: `Network` failures are retriable (offline queue),
//! everything else is not.

use thiserror::Error;

/// Result type for Sheets client operations.
pub type Result<T> = std::result::Result<T, SheetsError>;

/// Sheets client errors.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Missing or malformed input before any network call
    #[error("validation error: {0}")]
    Validation(String),

    /// Token missing, expired, or refresh failed
    #[error("authentication failed: {0}")]
    Auth(String),

    /// Transport-level failure (connection refused, DNS, fetch layer)
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx API response with a classified message
    #[error("sheets API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Unexpected response body shape
    #[error("response parse error: {0}")]
    Parse(String),
}

impl SheetsError {
    /// Whether this error is a transport failure callers may retry later.
    pub fn is_network(&self) -> bool {
        matches!(self, SheetsError::Network(_))
    }

    /// Classify a non-2xx status into a user-readable API error.
    ///
    /// `api_message` is the `error.message` field from the response body,
    /// empty when the body could not be parsed.
    pub fn from_status(status: u16, api_message: &str) -> Self {
        let message = match status {
            403 => "permission denied: share the spreadsheet with the connected account"
                .to_string(),
            404 => "spreadsheet not found: check the sheet id".to_string(),
            400 if api_message.contains("parse range") => {
                "unable to parse the worksheet range: check that the first worksheet exists"
                    .to_string()
            }
            400 => format!(
                "bad request: {}",
                if api_message.is_empty() {
                    "unknown error"
                } else {
                    api_message
                }
            ),
            _ => format!(
                "HTTP {}: {}",
                status,
                if api_message.is_empty() {
                    "unknown error"
                } else {
                    api_message
                }
            ),
        };
        SheetsError::Api { status, message }
    }

    /// Reclassify a reqwest transport error.
    ///
    /// Anything that happened before a status line was read is a network
    /// failure; body decode problems are parse failures.
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SheetsError::Parse(err.to_string())
        } else {
            SheetsError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        match SheetsError::from_status(403, "The caller does not have permission") {
            SheetsError::Api { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("permission denied"));
            }
            other => panic!("unexpected: {other:?}"),
        }

        match SheetsError::from_status(404, "") {
            SheetsError::Api { message, .. } => assert!(message.contains("not found")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_bad_request_range_parse() {
        let err = SheetsError::from_status(400, "Unable to parse range: Tab1!A:F");
        match err {
            SheetsError::Api { message, .. } => {
                assert!(message.contains("worksheet range"));
            }
            other => panic!("unexpected: {other:?}"),
        }

        let err = SheetsError::from_status(400, "Invalid values[0]");
        match err {
            SheetsError::Api { message, .. } => {
                assert!(message.starts_with("bad request"));
                assert!(message.contains("Invalid values[0]"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_generic_status_carries_code() {
        let err = SheetsError::from_status(503, "");
        match err {
            SheetsError::Api { status, message } => {
                assert_eq!(status, 503);
                assert!(message.contains("503"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_is_network() {
        assert!(SheetsError::Network("connection refused".into()).is_network());
        assert!(!SheetsError::Auth("no token".into()).is_network());
        assert!(!SheetsError::from_status(500, "").is_network());
    }
}
