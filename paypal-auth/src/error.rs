//! Error types for the `paypal-auth` crate.
//!
//! Follows the same pattern as domain::error with a root Error struct and error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for paypal-auth crate.
/// Holds error kind and optional source for error chaining.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in paypal-auth.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    OAuth(OAuthErrorKind),
    Webhook(WebhookErrorKind),
    Http(HttpErrorKind),
}

/// Errors from the OAuth client-credentials exchange.
#[derive(Debug, PartialEq)]
pub enum OAuthErrorKind {
    /// The token endpoint answered with a non-2xx status.
    TokenExchangeFailed,
    /// The token endpoint answered 2xx but without a usable `access_token`.
    InvalidResponse,
    /// The token endpoint could not be reached (including timeouts).
    Network,
}

/// Errors from webhook metadata extraction and remote verification.
#[derive(Debug, PartialEq)]
pub enum WebhookErrorKind {
    /// One or more transmission headers were absent or empty.
    MissingHeaders,
    /// The notification body is not valid JSON.
    InvalidPayload,
    /// The verification endpoint answered with a non-2xx status.
    VerificationFailed,
    /// The verification endpoint answered 401: the access token was not accepted.
    TokenRejected,
    /// The verification endpoint answered with a body we could not decode.
    InvalidResponse,
    /// The verification endpoint could not be reached (including timeouts).
    Network,
}

/// Errors building an outbound request.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    /// The endpoint URL could not be formed from the configured API base.
    BuilderFailed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::OAuth(kind) => write!(f, "OAuth error: {:?}", kind)?,
            ErrorKind::Webhook(kind) => write!(f, "Webhook error: {:?}", kind)?,
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind)?,
        }
        if let Some(source) = &self.source {
            write!(f, " ({source})")?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

/// Helper function to create OAuth errors.
pub fn oauth_error(kind: OAuthErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::OAuth(kind),
    }
}

/// Helper function to create webhook errors.
pub fn webhook_error(kind: WebhookErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Webhook(kind),
    }
}

/// Helper function to wrap a transport failure under the given kind while
/// keeping the underlying reqwest error as the source.
pub fn transport_error(error_kind: ErrorKind, err: reqwest::Error) -> Error {
    Error {
        source: Some(Box::new(err)),
        error_kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_source_message() {
        let err = oauth_error(OAuthErrorKind::TokenExchangeFailed, "status 401: invalid_client");
        let rendered = err.to_string();
        assert!(rendered.starts_with("OAuth error: TokenExchangeFailed"));
        assert!(rendered.contains("status 401: invalid_client"));
    }

    #[test]
    fn test_display_without_source() {
        let err = Error {
            source: None,
            error_kind: ErrorKind::Webhook(WebhookErrorKind::TokenRejected),
        };
        assert_eq!(err.to_string(), "Webhook error: TokenRejected");
    }
}
