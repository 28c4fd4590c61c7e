//! Token acquisition seam.
//!
//! The client never talks to an identity provider directly. Hosts plug in
//! whatever handshake they have (browser identity API, OAuth device flow,
//! service account) behind [`TokenProvider`].

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;

/// Source of bearer tokens for the Sheets API.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Obtain a bearer token.
    ///
    /// With `interactive = false` the provider must not prompt: it returns
    /// `Ok(None)` when no cached token exists. With `interactive = true` it
    /// may prompt the user and block until the handshake completes.
    async fn token(&self, interactive: bool) -> Result<Option<String>>;

    /// Drop a cached token that the API rejected, so the next `token` call
    /// re-acquires a fresh one.
    async fn invalidate(&self, token: &str) -> Result<()>;
}

/// A provider holding one pre-issued token.
///
/// Useful for tests and headless runs where the token is minted out of band.
/// Once invalidated the token is gone and `token` returns `Ok(None)`.
pub struct StaticTokenProvider {
    token: RwLock<Option<String>>,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self, _interactive: bool) -> Result<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn invalidate(&self, token: &str) -> Result<()> {
        let mut guard = self.token.write().await;
        if guard.as_deref() == Some(token) {
            *guard = None;
        }
        Ok(())
    }
}
