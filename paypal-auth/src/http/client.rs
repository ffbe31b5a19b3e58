//! HTTP client builder for processor calls.

use std::time::Duration;

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Whole-request timeout, applied to every outbound call.
    pub timeout: Duration,
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(5),
            user_agent: format!("paypal-auth/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Builder for the HTTP client shared by the token provider and the
/// signature verifier.
///
/// There is deliberately no retry middleware here: a failed call surfaces
/// immediately and the sender retries the whole notification.
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Create a new client builder with default configuration.
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the configured HTTP client.
    pub fn build(self) -> Result<reqwest::Client, reqwest::Error> {
        // The connect timeout can never outlive the overall request timeout.
        let connect_timeout = self.config.connect_timeout.min(self.config.timeout);

        reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(connect_timeout)
            .user_agent(self.config.user_agent)
            .build()
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        let builder = HttpClientBuilder::new();
        assert_eq!(builder.config.timeout, Duration::from_secs(10));
        assert_eq!(builder.config.connect_timeout, Duration::from_secs(5));
        assert!(builder.config.user_agent.starts_with("paypal-auth/"));
    }

    #[test]
    fn test_builder_with_timeout() {
        let builder = HttpClientBuilder::new().with_timeout(Duration::from_secs(60));
        assert_eq!(builder.config.timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_build_client_with_timeout_below_connect_timeout() {
        let result = HttpClientBuilder::new()
            .with_timeout(Duration::from_secs(2))
            .build();
        assert!(result.is_ok());
    }
}
