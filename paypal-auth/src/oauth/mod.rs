//! OAuth 2.0 client-credentials infrastructure.
//!
//! PayPal REST calls are authorized with a short-lived Bearer token obtained
//! by exchanging the app's client id/secret at `/v1/oauth2/token`.

mod cache;
mod client_credentials;
mod provider;
mod tokens;

pub use cache::CachedTokenProvider;
pub use client_credentials::{ClientCredentials, ClientCredentialsProvider, TOKEN_PATH};
pub use provider::AccessTokenProvider;
pub use tokens::Tokens;
