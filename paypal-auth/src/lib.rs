//! # paypal-auth
//!
//! Everything needed to talk to PayPal on behalf of the webhook service:
//! - OAuth 2.0 client-credentials token acquisition (with an optional cache)
//! - Basic and Bearer request authentication
//! - HTTP client building with bounded timeouts
//! - Webhook transmission metadata and remote signature verification
//! - Live/sandbox environment presets
//!
//! ## Usage
//!
//! ```rust,ignore
//! use paypal_auth::{
//!     http::HttpClientBuilder,
//!     oauth::{AccessTokenProvider, ClientCredentials, ClientCredentialsProvider},
//!     webhook::{RemoteSignatureVerifier, SignatureVerifier, TransmissionMetadata},
//! };
//! ```

pub mod auth;
pub mod error;
pub mod http;
pub mod oauth;
pub mod providers;
pub mod webhook;

// Re-export commonly used types
pub use error::{Error, ErrorKind};
