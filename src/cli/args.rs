//! CLI argument definitions using clap
//!
//! Commands:
//! - mahasiswa-service init --config <path> [--force]
//! - mahasiswa-service start [--config <path>] [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Student records HTTP service
#[derive(Parser, Debug)]
#[command(name = "mahasiswa-service")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default configuration file
    Init {
        /// Path of the configuration file to create
        #[arg(long, default_value = "./mahasiswa.json")]
        config: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file (built-in defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on, overriding the configuration
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start_with_overrides() {
        let cli = Cli::try_parse_from([
            "mahasiswa-service",
            "start",
            "--config",
            "/etc/mahasiswa.json",
            "--port",
            "8080",
        ])
        .unwrap();

        match cli.command {
            Command::Start { config, port } => {
                assert_eq!(config, Some(PathBuf::from("/etc/mahasiswa.json")));
                assert_eq!(port, Some(8080));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_init_defaults() {
        let cli = Cli::try_parse_from(["mahasiswa-service", "init"]).unwrap();
        match cli.command {
            Command::Init { config, force } => {
                assert_eq!(config, PathBuf::from("./mahasiswa.json"));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["mahasiswa-service", "start", "--port", "99999"]).is_err());
    }
}
