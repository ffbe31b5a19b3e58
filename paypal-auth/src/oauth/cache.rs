//! Expiry-aware access token cache.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{AccessTokenProvider, Tokens};
use crate::error::Error;

/// Reuses an access token from the wrapped provider until it nears expiry.
///
/// The cache is scoped to a single credential pair (the wrapped provider).
/// The lock is held across the refresh so concurrent requests that find
/// the cache empty wait for one exchange instead of each performing their
/// own.
pub struct CachedTokenProvider {
    inner: Arc<dyn AccessTokenProvider>,
    cached: Mutex<Option<Tokens>>,
}

impl CachedTokenProvider {
    /// Create a new cache around the given provider.
    pub fn new(inner: Arc<dyn AccessTokenProvider>) -> Self {
        Self {
            inner,
            cached: Mutex::new(None),
        }
    }
}

#[async_trait]
impl AccessTokenProvider for CachedTokenProvider {
    async fn access_token(&self) -> Result<Tokens, Error> {
        let mut cached = self.cached.lock().await;

        if let Some(tokens) = cached.as_ref().filter(|t| t.is_reusable()) {
            debug!("reusing cached PayPal access token");
            return Ok(tokens.clone());
        }

        debug!("cached PayPal access token missing or expiring, refreshing");
        let tokens = self.inner.access_token().await?;
        *cached = Some(tokens.clone());
        Ok(tokens)
    }

    async fn invalidate(&self) {
        debug!("dropping cached PayPal access token");
        *self.cached.lock().await = None;
    }
}
