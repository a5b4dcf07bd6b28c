//! Lifecycle events
//!
//! Every lifecycle log line carries one of these as its `event` field, so
//! log consumers can match on stable names rather than message text.

use std::fmt;

/// Observable lifecycle events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Boot & Lifecycle
    /// Process startup begins
    BootStart,
    /// Configuration loaded and validated
    ConfigLoaded,
    /// Store connection opened and pinged
    StoreConnected,
    /// Listener bound, accepting requests
    ServerListening,
    /// Shutdown signal received
    ShutdownStart,
    /// Listener stopped and store connection closed
    ShutdownComplete,
    /// Startup aborted (process exits)
    BootFailed,

    // Requests
    /// A handler returned an error response
    RequestFailed,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::StoreConnected => "STORE_CONNECTED",
            Event::ServerListening => "SERVER_LISTENING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",
            Event::BootFailed => "STARTUP_FAILED",
            Event::RequestFailed => "REQUEST_FAILED",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        assert_eq!(Event::BootStart.as_str(), "STARTUP_BEGIN");
        assert_eq!(Event::RequestFailed.to_string(), "REQUEST_FAILED");
    }

    #[test]
    fn test_names_are_distinct() {
        let all = [
            Event::BootStart,
            Event::ConfigLoaded,
            Event::StoreConnected,
            Event::ServerListening,
            Event::ShutdownStart,
            Event::ShutdownComplete,
            Event::BootFailed,
            Event::RequestFailed,
        ];
        let names: std::collections::HashSet<_> = all.iter().map(Event::as_str).collect();
        assert_eq!(names.len(), all.len());
    }
}
