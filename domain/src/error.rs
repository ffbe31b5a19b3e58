//! Error types for the `domain` layer.
use paypal_auth::error::{
    Error as PayPalAuthError, ErrorKind as PayPalAuthErrorKind, HttpErrorKind,
    WebhookErrorKind as PayPalWebhookErrorKind,
};
use std::error::Error as StdError;
use std::fmt;

/// Top-level domain error type.
/// Errors in the Domain layer are modeled as a tree structure
/// with `domain::error::Error` as the root type holding a tree of `error_kind`
/// enums that represent the kinds of errors that can occur in the domain layer or
/// in lower layers. The `source` field is used to hold the original error that caused
/// the domain error. The intent is to translate errors between layers while maintaining
/// layer boundaries. Ex. `domain` is dependent on `paypal-auth`, and `web` is dependent on `domain`,
/// but `web` should not be dependent, directly, on `paypal-auth`. Ultimately the various
/// `error_kind`s are used by `web` to return appropriate HTTP status codes and messages to the sender.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: DomainErrorKind,
}

/// Enum representing the major categories of errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum DomainErrorKind {
    Internal(InternalErrorKind),
    External(ExternalErrorKind),
    Webhook(WebhookErrorKind),
}

/// Enum representing the various kinds of internal errors that can occur in the `domain` layer.
#[derive(Debug, PartialEq)]
pub enum InternalErrorKind {
    Config,
    Other(String),
}

/// Enum representing failures to get an answer out of PayPal. All of these are
/// transient from the sender's point of view.
#[derive(Debug, PartialEq)]
pub enum ExternalErrorKind {
    /// The OAuth2 token exchange failed.
    Credential,
    /// The signature verification call failed before producing a verdict.
    VerificationTransport,
    Network,
    Other(String),
}

/// Enum representing deterministic rejections of an inbound notification.
/// Resending the same notification will be rejected the same way.
#[derive(Debug, PartialEq)]
pub enum WebhookErrorKind {
    MissingHeaders,
    InvalidPayload,
    SignatureRejected,
}

impl Error {
    /// Wrap a failure of the token exchange stage.
    pub fn credential(err: PayPalAuthError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::Credential),
        }
    }

    /// Wrap a failure of the verification call stage.
    pub fn verification_transport(err: PayPalAuthError) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: DomainErrorKind::External(ExternalErrorKind::VerificationTransport),
        }
    }

    /// PayPal answered, and the answer was not `SUCCESS`.
    pub fn signature_rejected(reported: Option<&str>) -> Self {
        Error {
            source: Some(
                format!(
                    "verification_status was {}",
                    reported.map_or("absent".to_string(), |s| format!("{s:?}"))
                )
                .into(),
            ),
            error_kind: DomainErrorKind::Webhook(WebhookErrorKind::SignatureRejected),
        }
    }

    /// A required setting is missing at startup.
    pub fn config(message: &str) -> Self {
        Error {
            source: Some(message.to_string().into()),
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Config),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Domain Error: {self:?}")
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Errors that result from issues building the reqwest::Client instance. This
        // type of error will occur prior to any network calls being made.
        if err.is_builder() {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(
                    "Failed to build reqwest client".to_string(),
                )),
            }
        // Errors that result from issues with the network call itself.
        } else {
            Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        }
    }
}

// This is where we translate errors from the `paypal-auth` layer to the `domain` layer.
impl From<PayPalAuthError> for Error {
    fn from(err: PayPalAuthError) -> Self {
        let error_kind = match &err.error_kind {
            PayPalAuthErrorKind::OAuth(_) => DomainErrorKind::External(ExternalErrorKind::Credential),
            PayPalAuthErrorKind::Webhook(PayPalWebhookErrorKind::MissingHeaders) => {
                DomainErrorKind::Webhook(WebhookErrorKind::MissingHeaders)
            }
            PayPalAuthErrorKind::Webhook(PayPalWebhookErrorKind::InvalidPayload) => {
                DomainErrorKind::Webhook(WebhookErrorKind::InvalidPayload)
            }
            PayPalAuthErrorKind::Webhook(_) => {
                DomainErrorKind::External(ExternalErrorKind::VerificationTransport)
            }
            PayPalAuthErrorKind::Http(HttpErrorKind::BuilderFailed) => {
                DomainErrorKind::Internal(InternalErrorKind::Other(err.to_string()))
            }
        };
        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paypal_auth::error::{oauth_error, webhook_error, OAuthErrorKind};

    #[test]
    fn test_translates_paypal_auth_errors() {
        let err: Error = oauth_error(OAuthErrorKind::TokenExchangeFailed, "401").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::Credential)
        );

        let err: Error = webhook_error(PayPalWebhookErrorKind::MissingHeaders, "x").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Webhook(WebhookErrorKind::MissingHeaders)
        );

        let err: Error = webhook_error(PayPalWebhookErrorKind::InvalidPayload, "x").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Webhook(WebhookErrorKind::InvalidPayload)
        );

        let err: Error = webhook_error(PayPalWebhookErrorKind::VerificationFailed, "503").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::VerificationTransport)
        );

        let err: Error = webhook_error(PayPalWebhookErrorKind::TokenRejected, "401").into();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::VerificationTransport)
        );
    }

    #[test]
    fn test_stage_constructors_ignore_inner_kind() {
        // A builder failure during the token stage is still a credential failure.
        let inner = PayPalAuthError {
            source: None,
            error_kind: PayPalAuthErrorKind::Http(HttpErrorKind::BuilderFailed),
        };
        assert_eq!(
            Error::credential(inner).error_kind,
            DomainErrorKind::External(ExternalErrorKind::Credential)
        );

        let inner = PayPalAuthError {
            source: None,
            error_kind: PayPalAuthErrorKind::OAuth(OAuthErrorKind::Network),
        };
        assert_eq!(
            Error::verification_transport(inner).error_kind,
            DomainErrorKind::External(ExternalErrorKind::VerificationTransport)
        );
    }

    #[test]
    fn test_signature_rejected_describes_status() {
        let err = Error::signature_rejected(Some("FAILURE"));
        assert!(err.source.unwrap().to_string().contains("\"FAILURE\""));

        let err = Error::signature_rejected(None);
        assert!(err.source.unwrap().to_string().contains("absent"));
    }
}
