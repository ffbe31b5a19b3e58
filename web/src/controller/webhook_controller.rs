//! Controller for PayPal webhook notifications.

use crate::{AppState, Error};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use log::*;
use std::collections::HashMap;

/// POST /webhook
///
/// Accepts a PayPal notification and answers 200 only once PayPal has
/// confirmed its signature. This endpoint does not require authentication;
/// the signature check is the authentication.
#[utoipa::path(
    post,
    path = "/webhook",
    params(
        ("paypal-transmission-id" = String, Header, description = "Unique id of this delivery attempt"),
        ("paypal-transmission-time" = String, Header, description = "When PayPal sent this delivery attempt"),
        ("paypal-cert-url" = String, Header, description = "URL of the certificate used to sign the notification"),
        ("paypal-auth-algo" = String, Header, description = "Signature algorithm, e.g. SHA256withRSA"),
        ("paypal-transmission-sig" = String, Header, description = "Signature over the notification"),
    ),
    request_body(content = String, description = "PayPal webhook event JSON", content_type = "application/json"),
    responses(
        (status = 200, description = "Webhook verified", body = String),
        (status = 400, description = "Missing headers, invalid payload or invalid signature", body = String),
        (status = 500, description = "Error verifying webhook", body = String),
    )
)]
pub async fn verify(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, Error> {
    let verified = app_state
        .processor
        .process(&header_values(&headers), &body)
        .await?;

    debug!(
        "Webhook verified: transmission_id={} event_type={}",
        verified.metadata.transmission_id,
        verified.event.event_type().unwrap_or("-")
    );

    Ok((StatusCode::OK, "Webhook verified"))
}

/// Header values keyed by lowercase name. Values that are not valid UTF-8
/// are dropped and therefore count as missing.
fn header_values(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue};

    #[test]
    fn test_header_values_lowercases_names_and_drops_opaque_values() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_bytes(b"PayPal-Transmission-Id").unwrap(),
            HeaderValue::from_static("T1"),
        );
        headers.insert(
            "paypal-transmission-sig",
            HeaderValue::from_bytes(b"\xffsig").unwrap(),
        );

        let values = header_values(&headers);

        assert_eq!(
            values.get("paypal-transmission-id").map(String::as_str),
            Some("T1")
        );
        assert!(!values.contains_key("paypal-transmission-sig"));
    }
}
