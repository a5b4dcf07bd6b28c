//! HTTP Server Configuration
//!
//! Configuration for the HTTP listener and per-request limits.

use std::io;
use std::net::{IpAddr, ToSocketAddrs};
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 3939)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Ceiling on each handler's store operation, in seconds (default: 5)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3939
}

fn default_request_timeout_secs() -> u64 {
    5
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        match self.host.parse::<IpAddr>() {
            Ok(IpAddr::V6(ip)) => format!("[{}]:{}", ip, self.port),
            _ => format!("{}:{}", self.host, self.port),
        }
    }

    /// Host and port in the form the listener resolves
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }

    /// Check that the host resolves to at least one address
    pub fn resolve(&self) -> io::Result<()> {
        if self.host.trim().is_empty() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "host is empty"));
        }

        match self.bind_target().to_socket_addrs()?.next() {
            Some(_) => Ok(()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("host '{}' resolves to no address", self.host),
            )),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HttpServerConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3939);
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_socket_addr() {
        let config = HttpServerConfig::with_port(8080);
        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_socket_addr_brackets_ipv6() {
        let config = HttpServerConfig {
            host: "::".to_string(),
            ..HttpServerConfig::with_port(8080)
        };
        assert_eq!(config.socket_addr(), "[::]:8080");
    }

    #[test]
    fn test_resolve_hosts() {
        for host in ["0.0.0.0", "127.0.0.1", "::", "localhost"] {
            let config = HttpServerConfig {
                host: host.to_string(),
                ..HttpServerConfig::default()
            };
            assert!(config.resolve().is_ok(), "{} should resolve", host);
        }

        let config = HttpServerConfig {
            host: " ".to_string(),
            ..HttpServerConfig::default()
        };
        assert!(config.resolve().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: HttpServerConfig = serde_json::from_str(r#"{"port": 9000}"#).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.request_timeout_secs, 5);
    }
}
