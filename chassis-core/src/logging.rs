//! Log initialization helpers.
//!
//! The core itself only emits `tracing` events; installing a subscriber is
//! the host's call. `LogConfig` offers the usual knobs:
//!
//! ```no_run
//! use chassis_core::logging::{LogConfig, LogFormat};
//!
//! LogConfig::new().level("debug").format(LogFormat::Pretty).init();
//! ```
//!
//! `RUST_LOG` overrides the configured filter when set.

use tracing_subscriber::EnvFilter;

/// Output format for the process-wide subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

/// Builder for the process-wide `tracing` subscriber.
#[derive(Debug, Clone)]
pub struct LogConfig {
    filter: String,
    format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default filter directive, e.g. `"debug"` or `"chassis_core=trace"`.
    pub fn level(mut self, filter: &str) -> Self {
        self.filter = filter.to_string();
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Install the global subscriber. Installing twice is a no-op, so
    /// tests may call this freely.
    pub fn init(self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.filter.clone()));
        let builder = tracing_subscriber::fmt().with_env_filter(filter);
        let already_installed = match self.format {
            LogFormat::Compact => builder.compact().try_init().is_err(),
            LogFormat::Pretty => builder.pretty().try_init().is_err(),
            LogFormat::Json => builder.json().try_init().is_err(),
        };
        if already_installed {
            tracing::debug!("global subscriber already installed");
        }
    }
}
