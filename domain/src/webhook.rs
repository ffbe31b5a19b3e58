//! Webhook verification state machine.
//!
//! One inbound notification moves through
//! `ReceivingHeaders -> HeadersValidated -> TokenAcquired -> SignatureChecked`
//! and ends in `Accepted`, `Rejected` or `Failed`. Every state entered is
//! logged as `transmission_id=<id> state=<State>`.

use crate::error::Error;
use crate::gateway::paypal::PayPalGateway;
use events::{DomainEvent, EventPublisher};
use log::*;
use paypal_auth::error::{
    ErrorKind as PayPalAuthErrorKind, WebhookErrorKind as PayPalWebhookErrorKind,
};
use paypal_auth::oauth::AccessTokenProvider;
use paypal_auth::webhook::{
    EventBody, SignatureVerifier, TransmissionMetadata, VerificationStatus,
    VerifyWebhookSignatureRequest, TRANSMISSION_ID_HEADER,
};
use service::config::Config;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookState {
    ReceivingHeaders,
    HeadersValidated,
    TokenAcquired,
    SignatureChecked,
    /// PayPal vouched for the notification.
    Accepted,
    /// The notification itself is bad. Resending it will not help.
    Rejected,
    /// PayPal could not be asked. The sender should retry.
    Failed,
}

impl fmt::Display for WebhookState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A notification that PayPal confirmed as authentic.
#[derive(Debug, Clone)]
pub struct VerifiedEvent {
    pub metadata: TransmissionMetadata,
    pub event: EventBody,
}

/// States entered while processing one notification.
struct Trail {
    transmission_id: String,
    states: Vec<WebhookState>,
}

impl Trail {
    fn new(headers: &HashMap<String, String>) -> Self {
        let transmission_id = headers
            .get(TRANSMISSION_ID_HEADER)
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .unwrap_or("-")
            .to_string();
        Self {
            transmission_id,
            states: Vec::with_capacity(5),
        }
    }

    fn enter(&mut self, state: WebhookState) {
        info!("transmission_id={} state={}", self.transmission_id, state);
        self.states.push(state);
    }

    fn reject(&mut self, reason: &dyn fmt::Display) {
        warn!(
            "transmission_id={} state={} reason={}",
            self.transmission_id,
            WebhookState::Rejected,
            reason
        );
        self.states.push(WebhookState::Rejected);
    }

    fn fail(&mut self, reason: &dyn fmt::Display) {
        error!(
            "transmission_id={} state={} reason={}",
            self.transmission_id,
            WebhookState::Failed,
            reason
        );
        self.states.push(WebhookState::Failed);
    }
}

/// Verifies inbound PayPal notifications and hands verified events to the
/// registered event handlers.
///
/// Holds no per-notification state, so one instance serves all requests.
pub struct WebhookProcessor {
    token_provider: Arc<dyn AccessTokenProvider>,
    signature_verifier: Arc<dyn SignatureVerifier>,
    webhook_id: String,
    events: EventPublisher,
}

impl WebhookProcessor {
    pub fn new(
        token_provider: Arc<dyn AccessTokenProvider>,
        signature_verifier: Arc<dyn SignatureVerifier>,
        webhook_id: String,
        events: EventPublisher,
    ) -> Self {
        Self {
            token_provider,
            signature_verifier,
            webhook_id,
            events,
        }
    }

    pub fn from_gateway(gateway: PayPalGateway, events: EventPublisher) -> Self {
        Self::new(
            gateway.token_provider,
            gateway.signature_verifier,
            gateway.webhook_id,
            events,
        )
    }

    /// Build a processor talking to the PayPal API configured in `config`.
    pub fn from_config(config: &Config, events: EventPublisher) -> Result<Self, Error> {
        Ok(Self::from_gateway(PayPalGateway::new(config)?, events))
    }

    /// Verify one notification.
    ///
    /// `headers` must be keyed by lowercase header name and `body` must be
    /// the request body exactly as received.
    ///
    /// Missing headers and malformed bodies are rejected before any call to
    /// PayPal. A token failure skips the verification call.
    pub async fn process(
        &self,
        headers: &HashMap<String, String>,
        body: &[u8],
    ) -> Result<VerifiedEvent, Error> {
        let mut trail = Trail::new(headers);
        self.run(headers, body, &mut trail).await
    }

    async fn run(
        &self,
        headers: &HashMap<String, String>,
        body: &[u8],
        trail: &mut Trail,
    ) -> Result<VerifiedEvent, Error> {
        trail.enter(WebhookState::ReceivingHeaders);
        let metadata = TransmissionMetadata::from_headers(headers).map_err(|err| {
            trail.reject(&err);
            Error::from(err)
        })?;
        trail.enter(WebhookState::HeadersValidated);

        let event = EventBody::parse(body).map_err(|err| {
            trail.reject(&err);
            Error::from(err)
        })?;

        let tokens = self.token_provider.access_token().await.map_err(|err| {
            trail.fail(&err);
            Error::credential(err)
        })?;
        trail.enter(WebhookState::TokenAcquired);

        let request = VerifyWebhookSignatureRequest::new(&metadata, &self.webhook_id, event.raw());
        let status = match self
            .signature_verifier
            .verify(&tokens.access_token, &request)
            .await
        {
            Ok(status) => status,
            Err(err) => {
                trail.fail(&err);
                // A token PayPal refuses must not be handed out again.
                if err.error_kind
                    == PayPalAuthErrorKind::Webhook(PayPalWebhookErrorKind::TokenRejected)
                {
                    self.token_provider.invalidate().await;
                }
                return Err(Error::verification_transport(err));
            }
        };
        trail.enter(WebhookState::SignatureChecked);

        match status {
            VerificationStatus::Verified => {
                trail.enter(WebhookState::Accepted);
                self.events.publish(verified_event(&metadata, &event)).await;
                Ok(VerifiedEvent { metadata, event })
            }
            VerificationStatus::NotVerified { reported } => {
                trail.reject(&format!("verification_status={reported:?}"));
                Err(Error::signature_rejected(reported.as_deref()))
            }
        }
    }
}

fn verified_event(metadata: &TransmissionMetadata, event: &EventBody) -> DomainEvent {
    DomainEvent::PaymentWebhookVerified {
        transmission_id: metadata.transmission_id.clone(),
        event_id: event.event_id().map(str::to_string),
        event_type: event.event_type().map(str::to_string),
        resource_type: event.resource_type().map(str::to_string),
        summary: event.summary().map(str::to_string),
        event: event.value().clone(),
    }
}
