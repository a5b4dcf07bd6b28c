//! Observability for the student service
//!
//! - Structured logging through `tracing`, JSON by default
//! - Typed lifecycle events with stable names
//!
//! # Usage
//!
//! ```ignore
//! use mahasiswa_service::observability::{init_logging, Event, LogConfig};
//! use tracing::info;
//!
//! init_logging(&LogConfig::default())?;
//! info!(event = %Event::BootStart, "starting");
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{init_logging, LogConfig, LogFormat};

use thiserror::Error;

/// Observability setup error.
///
/// Never fatal: the service keeps running without a subscriber.
#[derive(Debug, Clone, Error)]
#[error("observability setup failed: {message}")]
pub struct ObservabilityError {
    message: String,
}

impl ObservabilityError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Result type for observability operations
pub type ObservabilityResult<T> = Result<T, ObservabilityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observability_error_display() {
        let err = ObservabilityError::new("bad filter");
        assert_eq!(err.message(), "bad filter");
        assert!(err.to_string().contains("bad filter"));
    }
}
