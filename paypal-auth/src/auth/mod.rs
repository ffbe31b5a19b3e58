//! Request authentication for PayPal REST calls.
//!
//! The token endpoint takes HTTP Basic credentials built from the client
//! id/secret pair; every other endpoint takes the resulting Bearer token.

mod basic;
mod bearer;

pub use basic::BasicAuth;
pub use bearer::BearerTokenAuth;

use reqwest::RequestBuilder;

/// Trait for authenticating outbound HTTP requests.
pub trait RequestAuth: Send + Sync {
    /// Apply authentication to a request builder.
    fn authenticate(&self, request: RequestBuilder) -> RequestBuilder;
}
