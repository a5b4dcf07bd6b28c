//! Service configuration
//!
//! Loaded from an optional JSON file, then overridden from the environment.
//! Every field has a default; only the MongoDB connection string must be
//! supplied when the mongo backend is selected. Credentials belong in the
//! connection string, so it is never written by `init`.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::observability::LogConfig;
use crate::store::MongoStoreSettings;

use super::errors::{CliError, CliResult};

/// Environment variable overriding `store.uri`
pub const ENV_MONGO_URI: &str = "MAHASISWA_MONGO_URI";
/// Environment variable overriding `http.port`
pub const ENV_PORT: &str = "MAHASISWA_PORT";

/// Which store adapter backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// MongoDB collection (default)
    #[default]
    Mongo,
    /// Process-local, lost on exit
    Memory,
}

/// Store section of the configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// MongoDB connection string (required for the mongo backend)
    #[serde(default)]
    pub uri: Option<String>,

    /// Database name (default: "mahasiswaDB")
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection name (default: "mahasiswa")
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Bound on connecting and the startup ping, in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_database() -> String {
    "mahasiswaDB".to_string()
}

fn default_collection() -> String {
    "mahasiswa".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            uri: None,
            database: default_database(),
            collection: default_collection(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Resolve the effective configuration for `start`.
    ///
    /// Reads `path` when given (defaults otherwise), applies environment
    /// overrides, then validates.
    pub fn resolve(path: Option<&Path>) -> CliResult<Self> {
        Self::resolve_with(path, |key| std::env::var(key).ok())
    }

    /// `resolve` with overrides looked up through `lookup`
    pub fn resolve_with<F>(path: Option<&Path>, lookup: F) -> CliResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::read(path)?,
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    fn read(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Apply overrides looked up by variable name
    pub fn apply_overrides<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(ENV_MONGO_URI).filter(|v| !v.trim().is_empty()) {
            self.store.uri = Some(uri);
        }

        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.trim().parse().map_err(|_| {
                CliError::config_error(format!("Invalid {}: '{}'", ENV_PORT, port))
            })?;
        }

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.store.backend == StoreBackend::Mongo {
            let has_uri = self
                .store
                .uri
                .as_deref()
                .is_some_and(|uri| !uri.trim().is_empty());
            if !has_uri {
                return Err(CliError::config_error(format!(
                    "store.uri is required for the mongo backend (or set {})",
                    ENV_MONGO_URI
                )));
            }
        }

        if self.store.database.trim().is_empty() {
            return Err(CliError::config_error("store.database must not be empty"));
        }

        if self.store.collection.trim().is_empty() {
            return Err(CliError::config_error("store.collection must not be empty"));
        }

        if self.store.connect_timeout_secs == 0 {
            return Err(CliError::config_error(
                "store.connect_timeout_secs must be > 0",
            ));
        }

        self.http.resolve().map_err(|e| {
            CliError::config_error(format!("http.host '{}' is not bindable: {}", self.http.host, e))
        })?;

        if self.http.request_timeout_secs == 0 {
            return Err(CliError::config_error(
                "http.request_timeout_secs must be > 0",
            ));
        }

        self.log.validate()?;

        Ok(())
    }

    /// Connection settings for the mongo backend
    pub fn mongo_settings(&self) -> CliResult<MongoStoreSettings> {
        let uri = self
            .store
            .uri
            .clone()
            .ok_or_else(|| CliError::config_error("store.uri is not set"))?;

        Ok(MongoStoreSettings {
            uri,
            database: self.store.database.clone(),
            collection: self.store.collection.clone(),
            connect_timeout: Duration::from_secs(self.store.connect_timeout_secs),
        })
    }
}
