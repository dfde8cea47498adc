//! Logging setup.
//!
//! The crate only emits `tracing` events; installing a subscriber is left
//! to the binary. [`init_tracing`] is a convenience for binaries and
//! examples that want the usual `fmt` output.

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::errors::{PaaError, Result};

/// Output format of the `fmt` subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Subscriber configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TracingConfig {
    /// `EnvFilter` directives, e.g. `people_also_ask=debug`.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
        }
    }
}

impl TracingConfig {
    /// Reads directives from `RUST_LOG`, falling back to `info`.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            filter: std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| default_filter()),
            format: LogFormat::default(),
        }
    }

    /// Sets the filter directives.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Parses the filter directives.
    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.filter)
            .map_err(|e| PaaError::Config(format!("invalid log filter '{}': {e}", self.filter)))
    }
}

/// Installs a global `fmt` subscriber.
///
/// Fails if the filter does not parse or a global subscriber is already set.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    let filter = config.env_filter()?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match config.format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| PaaError::Config(format!("cannot install subscriber: {e}")))
}
