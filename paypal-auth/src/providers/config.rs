//! PayPal environment presets and endpoint URL construction.

use std::fmt;

use url::Url;

use crate::error::{Error, ErrorKind, HttpErrorKind};

/// Production REST API base URL.
pub const LIVE_API_BASE: &str = "https://api-m.paypal.com";

/// Sandbox REST API base URL.
pub const SANDBOX_API_BASE: &str = "https://api-m.sandbox.paypal.com";

/// Which PayPal environment an API base URL points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayPalEnvironment {
    Live,
    Sandbox,
    /// Anything else, e.g. a local mock server or an egress proxy.
    Custom(String),
}

impl PayPalEnvironment {
    /// Classify a configured API base URL.
    pub fn from_api_base(api_base: &str) -> Self {
        match api_base.trim_end_matches('/') {
            LIVE_API_BASE => PayPalEnvironment::Live,
            SANDBOX_API_BASE => PayPalEnvironment::Sandbox,
            other => PayPalEnvironment::Custom(other.to_string()),
        }
    }

    /// The API base URL for this environment.
    pub fn api_base(&self) -> &str {
        match self {
            PayPalEnvironment::Live => LIVE_API_BASE,
            PayPalEnvironment::Sandbox => SANDBOX_API_BASE,
            PayPalEnvironment::Custom(base) => base,
        }
    }

    pub fn is_live(&self) -> bool {
        *self == PayPalEnvironment::Live
    }
}

impl fmt::Display for PayPalEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PayPalEnvironment::Live => write!(f, "live"),
            PayPalEnvironment::Sandbox => write!(f, "sandbox"),
            PayPalEnvironment::Custom(base) => write!(f, "custom ({base})"),
        }
    }
}

/// Join an API base URL and an absolute endpoint path.
///
/// Any path prefix on the base is kept, so a base of
/// `https://proxy.internal/paypal` yields
/// `https://proxy.internal/paypal/v1/oauth2/token`.
pub fn endpoint_url(api_base: &str, path: &str) -> Result<Url, Error> {
    let joined = format!(
        "{}/{}",
        api_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );

    Url::parse(&joined).map_err(|e| Error {
        source: Some(Box::new(e)),
        error_kind: ErrorKind::Http(HttpErrorKind::BuilderFailed),
    })
}
