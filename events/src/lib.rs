//! Event system infrastructure for the webhook service.
//!
//! This crate provides the hand-off point between webhook verification and
//! whatever business logic reacts to a verified payment event (order
//! fulfillment, ledger writes, notifications).
//!
//! # Architecture
//!
//! - **DomainEvent**: Enum representing all business events in the system
//! - **EventHandler**: Trait for implementing event handlers
//! - **EventPublisher**: Publishes events to registered handlers
//!
//! This crate has no dependencies on internal crates (domain, paypal-auth,
//! etc.), avoiding circular dependencies. Event payloads are carried as
//! `serde_json::Value`.

mod log_handler;

pub use log_handler::LoggingEventHandler;

use async_trait::async_trait;
use log::*;
use serde_json::Value;
use std::sync::Arc;

/// Domain events that represent business-level changes in the system.
/// These events are emitted only after PayPal has vouched for the notification.
#[derive(Debug, Clone)]
pub enum DomainEvent {
    /// Emitted when a PayPal notification passes signature verification.
    PaymentWebhookVerified {
        /// Delivery attempt id from `paypal-transmission-id`. Retries of the
        /// same event arrive with different ids.
        transmission_id: String,
        /// PayPal's event id (`id` in the body), stable across retries.
        event_id: Option<String>,
        /// e.g. `PAYMENT.CAPTURE.COMPLETED`.
        event_type: Option<String>,
        /// e.g. `capture`.
        resource_type: Option<String>,
        /// Human readable summary supplied by PayPal.
        summary: Option<String>,
        /// The complete verified event.
        event: Value,
    },
}

impl DomainEvent {
    /// Short name used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            DomainEvent::PaymentWebhookVerified { .. } => "payment_webhook_verified",
        }
    }
}

/// Trait for handling domain events.
/// Implementations can perform side effects like fulfilling orders,
/// updating caches, logging, etc.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &DomainEvent);
}

/// Publishes domain events to registered handlers.
/// Handlers are called sequentially in registration order.
#[derive(Clone)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    /// Store the returned publisher in your application state.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Publish an event to all registered handlers.
    /// Handlers are called sequentially and own their error handling.
    pub async fn publish(&self, event: DomainEvent) {
        debug!(
            "Publishing {} to {} handler(s)",
            event.name(),
            self.handlers.len()
        );
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingHandler {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventHandler for RecordingHandler {
        async fn handle(&self, event: &DomainEvent) {
            let DomainEvent::PaymentWebhookVerified {
                transmission_id, ..
            } = event;
            self.seen.lock().await.push(transmission_id.clone());
        }
    }

    fn verified(transmission_id: &str) -> DomainEvent {
        DomainEvent::PaymentWebhookVerified {
            transmission_id: transmission_id.to_string(),
            event_id: Some("EVT-1".to_string()),
            event_type: Some("PAYMENT.CAPTURE.COMPLETED".to_string()),
            resource_type: Some("capture".to_string()),
            summary: None,
            event: json!({"id": "EVT-1"}),
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_every_handler_in_order() {
        let first = Arc::new(RecordingHandler::default());
        let second = Arc::new(RecordingHandler::default());
        let publisher = EventPublisher::new()
            .with_handler(first.clone())
            .with_handler(second.clone());

        publisher.publish(verified("T1")).await;
        publisher.publish(verified("T2")).await;

        assert_eq!(publisher.handler_count(), 2);
        assert_eq!(*first.seen.lock().await, vec!["T1", "T2"]);
        assert_eq!(*second.seen.lock().await, vec!["T1", "T2"]);
    }

    #[tokio::test]
    async fn test_with_handler_leaves_original_untouched() {
        let base = EventPublisher::new();
        let extended = base.clone().with_handler(Arc::new(RecordingHandler::default()));

        assert_eq!(base.handler_count(), 0);
        assert_eq!(extended.handler_count(), 1);
    }

    #[tokio::test]
    async fn test_publish_without_handlers_is_a_noop() {
        EventPublisher::default().publish(verified("T1")).await;
    }

    #[test]
    fn test_event_name() {
        assert_eq!(verified("T1").name(), "payment_webhook_verified");
    }
}
