//! Webhook transmission metadata and signature verification.
//!
//! PayPal signs each notification with a certificate-backed signature. This
//! crate never checks that signature itself; it forwards the transmission
//! headers and the untouched event to PayPal and trusts the answer.

mod event;
mod metadata;
mod verification;

pub use event::EventBody;
pub use metadata::{
    missing_headers, TransmissionMetadata, AUTH_ALGO_HEADER, CERT_URL_HEADER, REQUIRED_HEADERS,
    TRANSMISSION_ID_HEADER, TRANSMISSION_SIG_HEADER, TRANSMISSION_TIME_HEADER,
};
pub use verification::{
    RemoteSignatureVerifier, SignatureVerifier, VerificationStatus,
    VerifyWebhookSignatureRequest, SUCCESS_STATUS, VERIFY_PATH,
};
