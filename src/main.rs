use domain::webhook::WebhookProcessor;
use events::{EventPublisher, LoggingEventHandler};
use log::{error, info};
use service::{config::Config, logging::Logger};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = Config::new();
    if let Err(e) = Logger::init_logger(&config) {
        eprintln!("Failed to start logger: {e}");
        std::process::exit(1);
    }

    info!(
        "Starting up PayPal webhook service [{}]...",
        config.runtime_env()
    );

    let missing = config.missing_paypal_settings();
    if !missing.is_empty() {
        error!(
            "Refusing to start without required PayPal settings: {}",
            missing.join(", ")
        );
        std::process::exit(1);
    }

    if config.paypal_token_cache {
        info!("PayPal access tokens will be reused until shortly before expiry");
    } else {
        info!("PayPal token cache disabled, every notification performs a fresh token exchange");
    }

    let events = EventPublisher::new().with_handler(Arc::new(LoggingEventHandler::new()));
    info!("Registered {} webhook event handler(s)", events.handler_count());

    let processor = match WebhookProcessor::from_config(&config, events) {
        Ok(processor) => Arc::new(processor),
        Err(e) => {
            error!("Failed to set up PayPal webhook verification: {e}");
            std::process::exit(1);
        }
    };

    let app_state = web::AppState::new(config, processor);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server exited with error: {e}");
        std::process::exit(1);
    }
}
