use std::error::Error as StdError;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use domain::error::{DomainErrorKind, Error as DomainError, WebhookErrorKind};
use log::*;

#[derive(Debug)]
pub struct Error(DomainError);

impl StdError for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> core::result::Result<(), std::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

// Responses carry only a status and a short reason. Upstream detail stays in the server log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self.0.error_kind {
            DomainErrorKind::Webhook(webhook_error_kind) => match webhook_error_kind {
                WebhookErrorKind::MissingHeaders => {
                    (StatusCode::BAD_REQUEST, "Missing headers").into_response()
                }
                WebhookErrorKind::InvalidPayload => {
                    (StatusCode::BAD_REQUEST, "Invalid payload").into_response()
                }
                WebhookErrorKind::SignatureRejected => {
                    (StatusCode::BAD_REQUEST, "Invalid signature").into_response()
                }
            },
            DomainErrorKind::External(external_error_kind) => {
                debug!("Upstream failure while verifying webhook: {external_error_kind:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error verifying webhook").into_response()
            }
            DomainErrorKind::Internal(internal_error_kind) => {
                error!("Internal error while verifying webhook: {internal_error_kind:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Error verifying webhook").into_response()
            }
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<DomainError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
