//! Access token provider trait.

use async_trait::async_trait;

use super::Tokens;
use crate::error::Error;

/// Trait for anything that can hand out a PayPal access token.
///
/// Implementations either perform a fresh client-credentials exchange on
/// every call or reuse a cached token while it remains valid.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Obtain an access token.
    ///
    /// # Returns
    ///
    /// The token together with its expiry metadata, or an
    /// `ErrorKind::OAuth` error if the exchange failed.
    async fn access_token(&self) -> Result<Tokens, Error>;

    /// Forget any token handed out so far. The next call to
    /// `access_token` performs a fresh exchange.
    ///
    /// Providers that keep no token are unaffected.
    async fn invalidate(&self) {}
}
