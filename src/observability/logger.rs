//! Log subscriber setup
//!
//! Installs a `tracing-subscriber` formatter as the global default. `RUST_LOG`
//! takes precedence over the configured filter when set.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use super::{ObservabilityError, ObservabilityResult};

/// Output format of log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line
    #[default]
    Json,
    /// Human-readable multi-line output
    Pretty,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub format: LogFormat,

    /// `EnvFilter` directive used when `RUST_LOG` is unset (default: "info")
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

impl LogConfig {
    /// Check that the configured filter parses
    pub fn validate(&self) -> ObservabilityResult<()> {
        self.configured_filter().map(|_| ())
    }

    fn configured_filter(&self) -> ObservabilityResult<EnvFilter> {
        EnvFilter::try_new(&self.filter).map_err(|e| {
            ObservabilityError::new(format!("invalid log filter '{}': {}", self.filter, e))
        })
    }

    /// Resolve the effective filter
    pub fn env_filter(&self) -> ObservabilityResult<EnvFilter> {
        self.filter_with_override(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
    }

    /// Prefer `directives` over the configured filter.
    ///
    /// Malformed directives are reported on stderr and skipped; no subscriber
    /// exists yet to carry the warning.
    fn filter_with_override(&self, directives: Option<&str>) -> ObservabilityResult<EnvFilter> {
        let Some(directives) = directives else {
            return self.configured_filter();
        };

        match EnvFilter::try_new(directives) {
            Ok(filter) => Ok(filter),
            Err(e) => {
                eprintln!(
                    "ignoring {}='{}' ({}); using log filter '{}'",
                    EnvFilter::DEFAULT_ENV,
                    directives,
                    e,
                    self.filter
                );
                self.configured_filter()
            }
        }
    }
}

/// Install the global subscriber.
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> ObservabilityResult<()> {
    let filter = config.env_filter()?;

    let installed = match config.format {
        LogFormat::Json => fmt().with_env_filter(filter).json().try_init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).pretty().try_init(),
    };

    installed.map_err(|e| ObservabilityError::new(format!("failed to install subscriber: {}", e)))
}
