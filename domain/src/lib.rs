//! Domain layer of the webhook service.
//!
//! Turns an inbound PayPal notification into a verified event, or into an
//! error that `web` maps onto an HTTP response.

pub use paypal_auth::webhook::{EventBody, TransmissionMetadata, REQUIRED_HEADERS};

pub mod error;
pub mod gateway;
pub mod webhook;
