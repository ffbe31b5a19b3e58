//! OAuth token types.

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;
use serde::Deserialize;

/// Safety margin before the processor-reported expiry after which a token
/// is treated as expired.
const EXPIRY_BUFFER_MINUTES: i64 = 5;

/// OAuth access token with metadata.
#[derive(Debug, Clone)]
pub struct Tokens {
    /// Access token for API requests.
    pub access_token: SecretString,
    /// When the access token expires, if the processor said so.
    pub expires_at: Option<DateTime<Utc>>,
    /// Token type (usually "Bearer").
    pub token_type: String,
}

impl Tokens {
    /// Check if the access token is expired or about to expire soon.
    ///
    /// Returns true if token is expired or will expire within 5 minutes.
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .map(|expires| {
                let now = Utc::now();
                let buffer = Duration::minutes(EXPIRY_BUFFER_MINUTES);
                expires <= (now + buffer)
            })
            .unwrap_or(false)
    }

    /// True if the token carries an expiry and has not yet reached it.
    /// Tokens without an expiry are never considered reusable.
    pub fn is_reusable(&self) -> bool {
        self.expires_at.is_some() && !self.is_expired()
    }
}

/// Body of a successful `/v1/oauth2/token` response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
}

impl TokenResponse {
    /// Convert into `Tokens`, returning `None` when no usable token is present.
    pub(crate) fn into_tokens(self, issued_at: DateTime<Utc>) -> Option<Tokens> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;

        Some(Tokens {
            access_token: SecretString::from(access_token),
            expires_at: self
                .expires_in
                .filter(|secs| *secs > 0)
                .map(|secs| issued_at + Duration::seconds(secs)),
            token_type: self.token_type.unwrap_or_else(|| "Bearer".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn tokens_expiring_at(expires_at: Option<DateTime<Utc>>) -> Tokens {
        Tokens {
            access_token: SecretString::from("test".to_string()),
            expires_at,
            token_type: "Bearer".to_string(),
        }
    }

    #[test]
    fn test_token_not_expired() {
        let tokens = tokens_expiring_at(Some(Utc::now() + Duration::hours(1)));
        assert!(!tokens.is_expired());
        assert!(tokens.is_reusable());
    }

    #[test]
    fn test_token_expired() {
        let tokens = tokens_expiring_at(Some(Utc::now() - Duration::hours(1)));
        assert!(tokens.is_expired());
        assert!(!tokens.is_reusable());
    }

    #[test]
    fn test_token_expiring_soon() {
        let tokens = tokens_expiring_at(Some(Utc::now() + Duration::minutes(3)));
        assert!(tokens.is_expired());
    }

    #[test]
    fn test_token_without_expiry_is_not_reusable() {
        let tokens = tokens_expiring_at(None);
        assert!(!tokens.is_expired());
        assert!(!tokens.is_reusable());
    }

    #[test]
    fn test_token_response_into_tokens() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"scope":"https://uri.paypal.com/services/payments openid","access_token":"A21AA","token_type":"Bearer","app_id":"APP-80W","expires_in":32400,"nonce":"2024-01-01"}"#,
        )
        .unwrap();
        let issued_at = Utc::now();

        let tokens = response.into_tokens(issued_at).unwrap();
        assert_eq!(tokens.access_token.expose_secret(), "A21AA");
        assert_eq!(tokens.token_type, "Bearer");
        assert_eq!(tokens.expires_at, Some(issued_at + Duration::seconds(32400)));
    }

    #[test]
    fn test_token_response_without_access_token() {
        let response: TokenResponse =
            serde_json::from_str(r#"{"token_type":"Bearer","expires_in":32400}"#).unwrap();
        assert!(response.into_tokens(Utc::now()).is_none());

        let response: TokenResponse = serde_json::from_str(r#"{"access_token":""}"#).unwrap();
        assert!(response.into_tokens(Utc::now()).is_none());
    }
}
