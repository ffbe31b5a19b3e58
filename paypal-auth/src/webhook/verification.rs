//! Remote signature verification via `/v1/notifications/verify-webhook-signature`.

use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use tracing::{debug, warn};

use super::TransmissionMetadata;
use crate::auth::{BearerTokenAuth, RequestAuth};
use crate::error::{transport_error, webhook_error, Error, ErrorKind, WebhookErrorKind};
use crate::providers::endpoint_url;

/// Path of the verification endpoint relative to the API base.
pub const VERIFY_PATH: &str = "/v1/notifications/verify-webhook-signature";

/// The only `verification_status` value that means the signature is good.
pub const SUCCESS_STATUS: &str = "SUCCESS";

/// Request body for the verification endpoint.
///
/// `webhook_event` is the event JSON exactly as received, so the processor
/// checks the signature against the same bytes it signed.
#[derive(Debug, Serialize)]
pub struct VerifyWebhookSignatureRequest<'a> {
    pub transmission_id: &'a str,
    pub transmission_time: &'a str,
    pub cert_url: &'a str,
    pub auth_algo: &'a str,
    pub transmission_sig: &'a str,
    pub webhook_id: &'a str,
    pub webhook_event: &'a RawValue,
}

impl<'a> VerifyWebhookSignatureRequest<'a> {
    pub fn new(
        metadata: &'a TransmissionMetadata,
        webhook_id: &'a str,
        webhook_event: &'a RawValue,
    ) -> Self {
        Self {
            transmission_id: &metadata.transmission_id,
            transmission_time: &metadata.transmission_time,
            cert_url: &metadata.cert_url,
            auth_algo: &metadata.auth_algo,
            transmission_sig: &metadata.transmission_sig,
            webhook_id,
            webhook_event,
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyWebhookSignatureResponse {
    #[serde(default)]
    verification_status: Option<String>,
}

/// The processor's judgment, collapsed to a binary trust decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    /// Anything other than `SUCCESS`, including an absent status.
    NotVerified { reported: Option<String> },
}

impl VerificationStatus {
    /// Interpret the raw `verification_status` field.
    pub fn from_reported(reported: Option<String>) -> Self {
        match reported.as_deref() {
            Some(SUCCESS_STATUS) => VerificationStatus::Verified,
            _ => VerificationStatus::NotVerified { reported },
        }
    }

    pub fn is_verified(&self) -> bool {
        *self == VerificationStatus::Verified
    }
}

/// Trait for checking a webhook signature.
#[async_trait]
pub trait SignatureVerifier: Send + Sync {
    /// Ask whether the notification described by `request` is authentic.
    ///
    /// # Returns
    ///
    /// `Ok(Verified | NotVerified)` when the processor gave an answer, or an
    /// `ErrorKind::Webhook` error when it could not be asked.
    async fn verify(
        &self,
        access_token: &SecretString,
        request: &VerifyWebhookSignatureRequest<'_>,
    ) -> Result<VerificationStatus, Error>;
}

/// Verifies signatures by delegating to PayPal's verification endpoint.
///
/// Single attempt per call, no retries.
pub struct RemoteSignatureVerifier {
    api_base: String,
    http_client: reqwest::Client,
}

impl RemoteSignatureVerifier {
    /// Create a new verifier.
    ///
    /// # Arguments
    ///
    /// * `api_base` - Processor API base URL
    /// * `http_client` - Shared client carrying the configured timeouts
    pub fn new(api_base: String, http_client: reqwest::Client) -> Self {
        Self {
            api_base,
            http_client,
        }
    }
}

#[async_trait]
impl SignatureVerifier for RemoteSignatureVerifier {
    async fn verify(
        &self,
        access_token: &SecretString,
        request: &VerifyWebhookSignatureRequest<'_>,
    ) -> Result<VerificationStatus, Error> {
        let url = endpoint_url(&self.api_base, VERIFY_PATH)?;
        debug!(
            transmission_id = request.transmission_id,
            url = %url,
            "verifying webhook signature with PayPal"
        );

        let auth = BearerTokenAuth::new(access_token.clone());
        let response = auth
            .authenticate(self.http_client.post(url).json(request))
            .send()
            .await
            .map_err(|e| {
                warn!(
                    transmission_id = request.transmission_id,
                    error = %e,
                    "PayPal verification endpoint unreachable"
                );
                transport_error(ErrorKind::Webhook(WebhookErrorKind::Network), e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                transmission_id = request.transmission_id,
                status = %status,
                body = %body,
                "PayPal verification call rejected"
            );
            let kind = if status == StatusCode::UNAUTHORIZED {
                WebhookErrorKind::TokenRejected
            } else {
                WebhookErrorKind::VerificationFailed
            };
            return Err(webhook_error(
                kind,
                &format!("verification endpoint returned {status}: {body}"),
            ));
        }

        let body: VerifyWebhookSignatureResponse = response.json().await.map_err(|e| {
            warn!(
                transmission_id = request.transmission_id,
                error = %e,
                "PayPal verification response could not be decoded"
            );
            transport_error(ErrorKind::Webhook(WebhookErrorKind::InvalidResponse), e)
        })?;

        Ok(VerificationStatus::from_reported(body.verification_status))
    }
}
