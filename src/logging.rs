//! Logging setup for the binary
//!
//! The library only emits `tracing` events. The binary installs a
//! subscriber writing to stderr so stdout stays clean for reports.
//!
//! Priority order (highest to lowest):
//! 1. `PATHTREE_LOG` (EnvFilter directives, e.g. `pathtree=debug`)
//! 2. `-v` / `-q` on the command line
//! 3. Default level `warn`
//!
//! `PATHTREE_LOG_FORMAT=json` switches to JSON lines.

use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "PATHTREE_LOG";
pub const LOG_FORMAT_ENV: &str = "PATHTREE_LOG_FORMAT";

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn from_env() -> Self {
        match std::env::var(LOG_FORMAT_ENV).as_deref() {
            Ok("json") => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Number of `-v` flags
    pub verbose: u8,
    pub quiet: bool,
    pub use_color: bool,
}

impl LoggingConfig {
    /// Level implied by the command-line flags.
    pub fn level(&self) -> &'static str {
        if self.quiet {
            return "off";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Build the filter: `PATHTREE_LOG` wins over the flags.
fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(config.level()))
}

/// Initialize the global subscriber. Safe to call more than once; later
/// calls are ignored.
pub fn init_logging(config: &LoggingConfig) {
    let filter = build_env_filter(config);
    let base_subscriber = Registry::default().with(filter);

    let result = match LogFormat::from_env() {
        LogFormat::Json => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.use_color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("logging already initialized");
    }
}
