//! Pure Google Sheets REST API client.
//!
//! A minimal client for the Sheets v4 API. Supports appending value rows,
//! resolving worksheet names from spreadsheet metadata, and validating
//! spreadsheet access, with bearer-token auth and a single refresh-and-retry
//! on expiry.
//!
//! Token acquisition is delegated to a [`TokenProvider`] so hosts can plug in
//! their own identity handshake.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheets_client::{SheetsClient, StaticTokenProvider};
//! use std::sync::Arc;
//!
//! let client = SheetsClient::new(Arc::new(StaticTokenProvider::new(token)));
//!
//! let row = vec!["Engineer".into(), "Acme".into(), "2025-03-01".into()];
//! client.append_row("sheet-id", "Sheet1!A:F", &row).await?;
//! ```

pub mod error;
pub mod token;
pub mod types;

pub use error::{Result, SheetsError};
pub use token::{StaticTokenProvider, TokenProvider};
pub use types::{AppendResponse, SpreadsheetMeta};

use reqwest::Method;
use std::sync::Arc;
use tracing::{debug, warn};

use types::{ApiErrorBody, AppendRequest};

const BASE_URL: &str = "https://sheets.googleapis.com/v4";

/// Worksheet name used when metadata cannot be resolved.
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl SheetsClient {
    pub fn new(tokens: Arc<dyn TokenProvider>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            tokens,
        }
    }

    /// Point the client at a different endpoint (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Run the interactive token handshake.
    ///
    /// Succeeds when the provider hands back a token; used by hosts to
    /// connect an account ahead of any spreadsheet call.
    pub async fn authenticate(&self) -> Result<()> {
        match self.tokens.token(true).await? {
            Some(_) => Ok(()),
            None => Err(SheetsError::Auth("no token granted".into())),
        }
    }

    /// Issue an authorized request against the API.
    ///
    /// On HTTP 401 the cached token is invalidated, a fresh one acquired
    /// interactively, and the call retried exactly once. Failures inside
    /// that retry surface as [`SheetsError::Auth`].
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let token = self
            .tokens
            .token(true)
            .await?
            .ok_or_else(|| SheetsError::Auth("no token granted".into()))?;

        let url = format!("{}{}", self.base_url, path);
        let response = self.send(method.clone(), &url, &token, body).await?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            debug!(path, "token rejected, refreshing and retrying once");
            self.tokens.invalidate(&token).await?;
            let fresh = self
                .tokens
                .token(true)
                .await
                .map_err(|e| SheetsError::Auth(format!("token refresh failed: {e}")))?
                .ok_or_else(|| SheetsError::Auth("token refresh failed: no token granted".into()))?;
            return self
                .send(method, &url, &fresh, body)
                .await
                .map_err(|e| SheetsError::Auth(format!("retry after refresh failed: {e}")));
        }

        Ok(response)
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let mut req = self.http.request(method, url).bearer_auth(token);
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await.map_err(SheetsError::from_transport)
    }

    /// Turn a non-2xx response into a classified API error.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ApiErrorBody>()
            .await
            .ok()
            .and_then(|body| body.error)
            .and_then(|detail| detail.message)
            .unwrap_or_default();

        Err(SheetsError::from_status(status.as_u16(), &message))
    }

    /// Fetch spreadsheet metadata.
    pub async fn metadata(&self, sheet_id: &str) -> Result<SpreadsheetMeta> {
        let path = format!("/spreadsheets/{sheet_id}");
        let response = self.request(Method::GET, &path, None).await?;
        let response = Self::check(response).await?;
        response
            .json::<SpreadsheetMeta>()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))
    }

    /// Resolve the first worksheet's display name.
    ///
    /// Best-effort: any failure falls back to [`DEFAULT_SHEET_NAME`] rather
    /// than propagating, so a later append surfaces the real problem.
    pub async fn first_sheet_name(&self, sheet_id: &str) -> String {
        match self.metadata(sheet_id).await {
            Ok(meta) => match meta.sheets.into_iter().next() {
                Some(sheet) => sheet.properties.title,
                None => {
                    warn!(sheet_id, "spreadsheet has no worksheets, using default name");
                    DEFAULT_SHEET_NAME.to_string()
                }
            },
            Err(e) => {
                warn!(sheet_id, error = %e, "could not resolve sheet name, using default");
                DEFAULT_SHEET_NAME.to_string()
            }
        }
    }

    /// Append one row of values to a range.
    ///
    /// The range (e.g. `Sheet1!A:F`) is URL-encoded to survive `!` and `:`.
    /// Fails fast with a validation error on an empty sheet id, before any
    /// network call.
    pub async fn append_row(
        &self,
        sheet_id: &str,
        range: &str,
        row: &[String],
    ) -> Result<AppendResponse> {
        if sheet_id.trim().is_empty() {
            return Err(SheetsError::Validation("sheet id must not be empty".into()));
        }

        let encoded = urlencoding::encode(range);
        let path = format!(
            "/spreadsheets/{sheet_id}/values/{encoded}:append?valueInputOption=USER_ENTERED"
        );
        let body = serde_json::to_value(AppendRequest {
            values: vec![row.to_vec()],
        })
        .map_err(|e| SheetsError::Parse(e.to_string()))?;

        let response = self.request(Method::POST, &path, Some(&body)).await?;
        let response = Self::check(response).await?;

        debug!(sheet_id, range, "row appended");
        response
            .json::<AppendResponse>()
            .await
            .map_err(|e| SheetsError::Parse(e.to_string()))
    }

    /// Check that a spreadsheet exists and is reachable.
    ///
    /// Swallows all errors: callers only get a yes/no.
    pub async fn validate(&self, sheet_id: &str) -> bool {
        self.metadata(sheet_id).await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_append_rejects_empty_sheet_id() {
        let client = SheetsClient::new(Arc::new(StaticTokenProvider::new("tok")));

        let err = client
            .append_row("  ", "Sheet1!A:F", &["a".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, SheetsError::Validation(_)));
    }

    #[tokio::test]
    async fn test_authenticate_without_token_fails() {
        let provider = StaticTokenProvider::new("tok");
        provider.invalidate("tok").await.unwrap();

        let client = SheetsClient::new(Arc::new(provider));
        let err = client.authenticate().await.unwrap_err();
        assert!(matches!(err, SheetsError::Auth(_)));
    }
}
