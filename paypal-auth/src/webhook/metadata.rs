//! Transmission metadata carried in PayPal webhook headers.

use std::collections::HashMap;

use crate::error::{webhook_error, Error, WebhookErrorKind};

pub const TRANSMISSION_ID_HEADER: &str = "paypal-transmission-id";
pub const TRANSMISSION_TIME_HEADER: &str = "paypal-transmission-time";
pub const CERT_URL_HEADER: &str = "paypal-cert-url";
pub const AUTH_ALGO_HEADER: &str = "paypal-auth-algo";
pub const TRANSMISSION_SIG_HEADER: &str = "paypal-transmission-sig";

/// Every header a notification must carry, in the order they are reported.
pub const REQUIRED_HEADERS: [&str; 5] = [
    TRANSMISSION_ID_HEADER,
    TRANSMISSION_TIME_HEADER,
    CERT_URL_HEADER,
    AUTH_ALGO_HEADER,
    TRANSMISSION_SIG_HEADER,
];

/// The five identifying fields attached to one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransmissionMetadata {
    /// Unique per delivery attempt.
    pub transmission_id: String,
    pub transmission_time: String,
    /// Where the signer's certificate lives.
    pub cert_url: String,
    pub auth_algo: String,
    pub transmission_sig: String,
}

impl TransmissionMetadata {
    /// Extract the metadata from request headers.
    ///
    /// `headers` is keyed by lowercase header name. A header that is absent
    /// or empty counts as missing; every missing name is listed in the error.
    pub fn from_headers(headers: &HashMap<String, String>) -> Result<Self, Error> {
        let missing = missing_headers(headers);
        if !missing.is_empty() {
            return Err(webhook_error(
                WebhookErrorKind::MissingHeaders,
                &format!("missing transmission headers: {}", missing.join(", ")),
            ));
        }

        let value = |name: &str| headers.get(name).cloned().unwrap_or_default();

        Ok(Self {
            transmission_id: value(TRANSMISSION_ID_HEADER),
            transmission_time: value(TRANSMISSION_TIME_HEADER),
            cert_url: value(CERT_URL_HEADER),
            auth_algo: value(AUTH_ALGO_HEADER),
            transmission_sig: value(TRANSMISSION_SIG_HEADER),
        })
    }
}

/// Names of required headers that are absent or empty.
pub fn missing_headers(headers: &HashMap<String, String>) -> Vec<&'static str> {
    REQUIRED_HEADERS
        .iter()
        .copied()
        .filter(|name| headers.get(*name).map_or(true, |v| v.trim().is_empty()))
        .collect()
}
