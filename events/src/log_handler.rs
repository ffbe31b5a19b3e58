use crate::{DomainEvent, EventHandler};
use async_trait::async_trait;
use log::*;

/// Logs every verified event. Registered by default so that a deployment
/// without business handlers still leaves an audit trail.
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl LoggingEventHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventHandler for LoggingEventHandler {
    async fn handle(&self, event: &DomainEvent) {
        match event {
            DomainEvent::PaymentWebhookVerified {
                transmission_id,
                event_id,
                event_type,
                resource_type,
                summary,
                event,
            } => {
                info!(
                    "Verified webhook event: transmission_id={} event_id={} event_type={} resource_type={} summary={:?}",
                    transmission_id,
                    event_id.as_deref().unwrap_or("-"),
                    event_type.as_deref().unwrap_or("-"),
                    resource_type.as_deref().unwrap_or("-"),
                    summary,
                );
                debug!("Verified webhook event body [{}]: {}", transmission_id, event);
            }
        }
    }
}
