//! PayPal REST gateway.
//!
//! Builds the token provider and signature verifier from service config.

use crate::error::Error;
use log::*;
use paypal_auth::http::HttpClientBuilder;
use paypal_auth::oauth::{
    AccessTokenProvider, CachedTokenProvider, ClientCredentials, ClientCredentialsProvider,
};
use paypal_auth::providers::PayPalEnvironment;
use paypal_auth::webhook::{RemoteSignatureVerifier, SignatureVerifier};
use service::config::Config;
use std::sync::Arc;

/// Everything needed to talk to PayPal on behalf of one webhook.
pub struct PayPalGateway {
    pub environment: PayPalEnvironment,
    pub webhook_id: String,
    pub token_provider: Arc<dyn AccessTokenProvider>,
    pub signature_verifier: Arc<dyn SignatureVerifier>,
}

impl PayPalGateway {
    /// Create the gateway from config.
    ///
    /// Fails with `InternalErrorKind::Config` when any of the client id,
    /// client secret or webhook id is absent.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let missing = config.missing_paypal_settings();
        if !missing.is_empty() {
            warn!("Missing PayPal settings: {}", missing.join(", "));
            return Err(Error::config(&format!(
                "missing PayPal settings: {}",
                missing.join(", ")
            )));
        }

        let client_id = required(config.paypal_client_id(), "PAYPAL_CLIENT_ID")?;
        let client_secret = required(config.paypal_client_secret(), "PAYPAL_CLIENT_SECRET")?;
        let webhook_id = required(config.paypal_webhook_id(), "PAYPAL_WEBHOOK_ID")?;

        let environment = PayPalEnvironment::from_api_base(config.paypal_api_base());
        if config.is_production() && !environment.is_live() {
            warn!("Running in production against the {environment} PayPal API");
        }
        info!("Using PayPal API at {}", environment.api_base());

        let http_client = build_client(config)?;
        let token_provider = new_token_provider(
            ClientCredentials::new(client_id, client_secret),
            environment.api_base(),
            http_client.clone(),
            config.paypal_token_cache,
        );
        let signature_verifier = Arc::new(RemoteSignatureVerifier::new(
            environment.api_base().to_string(),
            http_client,
        ));

        Ok(Self {
            environment,
            webhook_id,
            token_provider,
            signature_verifier,
        })
    }
}

/// Create a token provider for the given credentials.
///
/// With `cache` set, tokens are reused until shortly before they expire.
/// Otherwise every call performs a fresh exchange.
pub fn new_token_provider(
    credentials: ClientCredentials,
    api_base: &str,
    http_client: reqwest::Client,
    cache: bool,
) -> Arc<dyn AccessTokenProvider> {
    let provider = Arc::new(ClientCredentialsProvider::new(
        credentials,
        api_base.to_string(),
        http_client,
    ));
    if cache {
        debug!("PayPal access token caching enabled");
        Arc::new(CachedTokenProvider::new(provider))
    } else {
        provider
    }
}

fn build_client(config: &Config) -> Result<reqwest::Client, Error> {
    Ok(HttpClientBuilder::new()
        .with_timeout(config.paypal_http_timeout())
        .build()?)
}

fn required<T>(value: Option<T>, name: &str) -> Result<T, Error> {
    value.ok_or_else(|| Error::config(&format!("missing PayPal setting: {name}")))
}
