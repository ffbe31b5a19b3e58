use domain::webhook::WebhookProcessor;
use log::*;
use service::config::Config;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

mod controller;
mod error;
mod router;

pub use error::Error;
pub use router::define_routes;

// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub processor: Arc<WebhookProcessor>,
}

impl AppState {
    pub fn new(app_config: Config, processor: Arc<WebhookProcessor>) -> Self {
        Self {
            config: app_config,
            processor,
        }
    }
}

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let listen_address = app_state.config.listen_address();
    let listener = tokio::net::TcpListener::bind(&listen_address).await?;

    info!("Server starting... listening for connections on http://{listen_address}");
    info!("Webhook endpoint available at http://{listen_address}/webhook");

    let router = define_routes(app_state).layer(TraceLayer::new_for_http());

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining in-flight requests"),
        Err(err) => {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await
        }
    }
}
