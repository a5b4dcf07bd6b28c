//! CLI module for the student service
//!
//! Provides command-line interface for:
//! - init: Write a default configuration file
//! - start: Boot the service and serve HTTP until shutdown

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, run, run_command, serve, start};
pub use config::{Config, StoreBackend, StoreConfig, ENV_MONGO_URI, ENV_PORT};
pub use errors::{CliError, CliErrorCode, CliResult};
