use crate::config::{Config, RustEnv};
use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Crates whose records are dropped unless running at Trace.
/// Their per-connection chatter would bury the per-transmission state lines.
const NOISY_DEPENDENCIES: &[&str] = &[
    "tower", "tracing", "hyper", "h2", "axum", "reqwest", "rustls", "mockito",
];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger for the configured level.
    ///
    /// Fails if a logger has already been installed in this process.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        TermLogger::init(
            config.log_level_filter,
            Self::build_log_config(config.log_level_filter),
            TerminalMode::Mixed,
            Self::color_choice(&config.runtime_env),
        )
    }

    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder
            .set_time_format_rfc3339()
            .set_target_level(Self::target_level(level));

        if Self::drops_dependency_records(level) {
            for module in NOISY_DEPENDENCIES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }

    fn drops_dependency_records(level: LevelFilter) -> bool {
        level < LevelFilter::Trace
    }

    /// Records forwarded from `tracing` in paypal-auth carry the emitting
    /// module as their target; print it whenever debugging.
    fn target_level(level: LevelFilter) -> LevelFilter {
        if level >= LevelFilter::Debug {
            LevelFilter::Trace
        } else {
            LevelFilter::Off
        }
    }

    // Production output goes to a log collector, not a terminal.
    fn color_choice(env: &RustEnv) -> ColorChoice {
        match env {
            RustEnv::Production => ColorChoice::Never,
            RustEnv::Development | RustEnv::Staging => ColorChoice::Auto,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noisy_dependencies_do_not_hide_our_crates() {
        for module in ["paypal_auth", "domain", "web", "events", "service"] {
            assert!(
                !NOISY_DEPENDENCIES.iter().any(|m| module.starts_with(m)),
                "{module} must not be filtered"
            );
        }
    }

    #[test]
    fn test_only_trace_keeps_dependency_records() {
        assert!(!Logger::drops_dependency_records(LevelFilter::Trace));
        for level in [
            LevelFilter::Off,
            LevelFilter::Error,
            LevelFilter::Warn,
            LevelFilter::Info,
            LevelFilter::Debug,
        ] {
            assert!(
                Logger::drops_dependency_records(level),
                "{level} should drop dependency records"
            );
        }
    }

    #[test]
    fn test_targets_are_shown_when_debugging() {
        assert_eq!(Logger::target_level(LevelFilter::Info), LevelFilter::Off);
        assert_eq!(Logger::target_level(LevelFilter::Debug), LevelFilter::Trace);
        assert_eq!(Logger::target_level(LevelFilter::Trace), LevelFilter::Trace);
    }

    #[test]
    fn test_production_disables_color() {
        assert!(matches!(
            Logger::color_choice(&RustEnv::Production),
            ColorChoice::Never
        ));
        assert!(matches!(
            Logger::color_choice(&RustEnv::Development),
            ColorChoice::Auto
        ));
    }

    #[test]
    fn test_build_log_config_at_every_level() {
        for level in [LevelFilter::Info, LevelFilter::Debug, LevelFilter::Trace] {
            let _config = Logger::build_log_config(level);
        }
    }
}
