//! Pre-defined PayPal environments.

mod config;

pub use config::{endpoint_url, PayPalEnvironment, LIVE_API_BASE, SANDBOX_API_BASE};
