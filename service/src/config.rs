use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use secrecy::{ExposeSecret, SecretString};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default PayPal REST API base URL used when `PAYPAL_API_BASE` is not set.
/// Use `https://api-m.sandbox.paypal.com` for the sandbox.
pub const DEFAULT_PAYPAL_API_BASE: &str = "https://api-m.paypal.com";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The client ID of the PayPal REST app used for the OAuth2 token exchange.
    #[arg(long, env)]
    paypal_client_id: Option<String>,

    /// The client secret of the PayPal REST app used for the OAuth2 token exchange.
    #[arg(long, env, hide_env_values = true, value_parser = parse_secret)]
    paypal_client_secret: Option<SecretString>,

    /// The ID of the webhook registered with PayPal that notifications are verified against.
    #[arg(long, env)]
    paypal_webhook_id: Option<String>,

    /// The base URL of the PayPal REST API.
    /// Override in tests to point at a mock server.
    #[arg(long, env, default_value = DEFAULT_PAYPAL_API_BASE)]
    paypal_api_base: String,

    /// Timeout in seconds for each outbound call to PayPal (token exchange and verification)
    #[arg(long, env, default_value_t = 10)]
    pub paypal_http_timeout_secs: u64,

    /// Reuse PayPal access tokens until shortly before they expire instead of
    /// requesting a fresh one for every notification.
    #[arg(long, env, action = clap::ArgAction::Set, default_value_t = false)]
    pub paypal_token_cache: bool,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 3000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Returns the PayPal REST app client ID, if configured.
    pub fn paypal_client_id(&self) -> Option<String> {
        self.paypal_client_id.clone()
    }

    /// Returns the PayPal REST app client secret, if configured.
    pub fn paypal_client_secret(&self) -> Option<SecretString> {
        self.paypal_client_secret.clone()
    }

    /// Returns the registered PayPal webhook ID, if configured.
    pub fn paypal_webhook_id(&self) -> Option<String> {
        self.paypal_webhook_id.clone()
    }

    /// Returns the PayPal REST API base URL without a trailing slash.
    pub fn paypal_api_base(&self) -> &str {
        self.paypal_api_base.trim_end_matches('/')
    }

    pub fn set_paypal_api_base(mut self, paypal_api_base: String) -> Self {
        self.paypal_api_base = paypal_api_base;
        self
    }

    /// Timeout applied to each outbound PayPal call.
    pub fn paypal_http_timeout(&self) -> Duration {
        Duration::from_secs(self.paypal_http_timeout_secs)
    }

    /// Names of the required PayPal settings that are absent or empty.
    pub fn missing_paypal_settings(&self) -> Vec<&'static str> {
        let secret = self
            .paypal_client_secret
            .as_ref()
            .map(|s| s.expose_secret().as_str());
        [
            ("PAYPAL_CLIENT_ID", self.paypal_client_id.as_deref()),
            ("PAYPAL_CLIENT_SECRET", secret),
            ("PAYPAL_WEBHOOK_ID", self.paypal_webhook_id.as_deref()),
        ]
        .into_iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    /// The `interface:port` pair to bind the listener to.
    pub fn listen_address(&self) -> String {
        format!(
            "{}:{}",
            self.interface.as_deref().unwrap_or("0.0.0.0"),
            self.port
        )
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

fn parse_secret(value: &str) -> Result<SecretString, Infallible> {
    Ok(SecretString::new(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        let mut argv = vec!["paypal_webhook_rs"];
        argv.extend_from_slice(args);
        Config::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_paypal_settings_from_args() {
        let config = parse(&[
            "--paypal-client-id",
            "client",
            "--paypal-client-secret",
            "secret",
            "--paypal-webhook-id",
            "WH-1",
            "--paypal-api-base",
            "https://api-m.sandbox.paypal.com/",
        ]);

        assert_eq!(config.paypal_client_id().as_deref(), Some("client"));
        assert_eq!(
            config
                .paypal_client_secret()
                .map(|s| s.expose_secret().clone())
                .as_deref(),
            Some("secret")
        );
        assert_eq!(config.paypal_webhook_id().as_deref(), Some("WH-1"));
        assert_eq!(config.paypal_api_base(), "https://api-m.sandbox.paypal.com");
        assert!(config.missing_paypal_settings().is_empty());
    }

    #[test]
    fn test_debug_output_redacts_client_secret() {
        let config = parse(&["--paypal-client-secret", "hunter2-s3cr3t"]);

        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter2-s3cr3t"));
        assert!(rendered.contains("paypal_client_secret"));
    }

    #[test]
    fn test_missing_paypal_settings_reports_empty_values() {
        let config = parse(&[
            "--paypal-client-id",
            "client",
            "--paypal-client-secret",
            "",
            "--paypal-webhook-id",
            "WH-1",
        ]);

        assert_eq!(config.missing_paypal_settings(), vec!["PAYPAL_CLIENT_SECRET"]);
    }

    #[test]
    fn test_listener_and_timeout_from_args() {
        let config = parse(&[
            "--port",
            "8080",
            "--interface",
            "127.0.0.1",
            "--paypal-http-timeout-secs",
            "3",
            "--paypal-token-cache",
            "true",
        ]);

        assert_eq!(config.listen_address(), "127.0.0.1:8080");
        assert_eq!(config.paypal_http_timeout(), Duration::from_secs(3));
        assert!(config.paypal_token_cache);
    }

    #[test]
    fn test_set_paypal_api_base() {
        let config = parse(&["--paypal-api-base", "https://api-m.paypal.com"])
            .set_paypal_api_base("http://127.0.0.1:1234".to_string());
        assert_eq!(config.paypal_api_base(), "http://127.0.0.1:1234");
    }

    #[test]
    fn test_runtime_env_parsing() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));

        let config = parse(&["--runtime-env", "production"]);
        assert!(config.is_production());
    }
}
