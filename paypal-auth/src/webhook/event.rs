//! The notification body, kept byte-exact alongside its parsed form.

use serde_json::value::RawValue;
use serde_json::Value;

use crate::error::{webhook_error, Error, WebhookErrorKind};

/// A webhook event body as received.
///
/// `raw` holds the exact bytes from the wire and is what gets forwarded
/// to the verification endpoint; `value` is the parsed form used for
/// logging and downstream handlers.
#[derive(Debug, Clone)]
pub struct EventBody {
    raw: Box<RawValue>,
    value: Value,
}

impl EventBody {
    /// Parse a notification body.
    ///
    /// The body must be a UTF-8 JSON object.
    pub fn parse(body: &[u8]) -> Result<Self, Error> {
        let text = std::str::from_utf8(body).map_err(|e| {
            webhook_error(
                WebhookErrorKind::InvalidPayload,
                &format!("event body is not UTF-8: {e}"),
            )
        })?;

        let raw: Box<RawValue> = serde_json::from_str(text).map_err(|e| {
            webhook_error(
                WebhookErrorKind::InvalidPayload,
                &format!("event body is not JSON: {e}"),
            )
        })?;

        let value: Value = serde_json::from_str(raw.get()).map_err(|e| {
            webhook_error(
                WebhookErrorKind::InvalidPayload,
                &format!("event body is not JSON: {e}"),
            )
        })?;

        if !value.is_object() {
            return Err(webhook_error(
                WebhookErrorKind::InvalidPayload,
                "event body must be a JSON object",
            ));
        }

        Ok(Self {
            raw,
            value,
        })
    }

    /// The event JSON exactly as it appeared on the wire.
    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    /// The parsed event.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// PayPal event id, e.g. `WH-2WR32451HC0233532-67976317FL4543714`.
    pub fn event_id(&self) -> Option<&str> {
        self.str_field("id")
    }

    /// Event type, e.g. `PAYMENT.CAPTURE.COMPLETED`.
    pub fn event_type(&self) -> Option<&str> {
        self.str_field("event_type")
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.str_field("resource_type")
    }

    pub fn summary(&self) -> Option<&str> {
        self.str_field("summary")
    }

    fn str_field(&self, name: &str) -> Option<&str> {
        self.value.get(name).and_then(Value::as_str)
    }
}
