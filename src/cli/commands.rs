//! CLI command implementations
//!
//! `start` follows a fixed boot sequence: resolve config, install logging,
//! open and ping the store, bind the listener, serve until a shutdown signal,
//! then close the store. Any failure before serving is fatal.

use std::fs;
use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::http_server::HttpServer;
use crate::observability::{init_logging, Event};
use crate::store::{InMemoryStudentStore, MongoStudentStore, StudentStore};

use super::args::Command;
use super::config::{Config, StoreBackend};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Init { config, force } => init(&config, force),
        Command::Start { config, port } => start(config.as_deref(), port),
    }
}

/// Write a default configuration file.
///
/// The connection string is left unset; supply it in the file or through
/// `MAHASISWA_MONGO_URI`.
pub fn init(config_path: &Path, force: bool) -> CliResult<()> {
    if config_path.exists() && !force {
        return Err(CliError::already_initialized(config_path.display()));
    }

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut content = serde_json::to_string_pretty(&Config::default())?;
    content.push('\n');
    fs::write(config_path, content)?;

    println!("Wrote default configuration to {}", config_path.display());
    Ok(())
}

/// Start the HTTP server and block until it shuts down
pub fn start(config_path: Option<&Path>, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::resolve(config_path)?;
    if let Some(port) = port {
        config.http.port = port;
    }

    init_logging(&config.log)?;

    info!(
        event = %Event::BootStart,
        version = env!("CARGO_PKG_VERSION"),
        "starting student service"
    );
    info!(
        event = %Event::ConfigLoaded,
        backend = ?config.store.backend,
        database = %config.store.database,
        collection = %config.store.collection,
        addr = %config.http.socket_addr()
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(serve(config, shutdown_signal()))
}

/// Open the store, serve until `shutdown` resolves, then close the store
pub async fn serve<F>(config: Config, shutdown: F) -> CliResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let store = open_store(&config).await.inspect_err(|e| {
        error!(event = %Event::BootFailed, error = %e);
    })?;
    info!(event = %Event::StoreConnected, backend = ?config.store.backend);

    let server = HttpServer::new(config.http.clone(), Arc::clone(&store));
    let served = server.start(shutdown).await;

    store.shutdown().await;
    info!(event = %Event::ShutdownComplete);

    served.map_err(|e| {
        error!(event = %Event::BootFailed, error = %e);
        CliError::boot_failed(format!("HTTP server failed: {}", e))
    })
}

/// Build the configured store adapter
async fn open_store(config: &Config) -> CliResult<Arc<dyn StudentStore>> {
    match config.store.backend {
        StoreBackend::Memory => {
            warn!("using the in-memory store; records are lost on exit");
            Ok(Arc::new(InMemoryStudentStore::new()))
        }
        StoreBackend::Mongo => {
            let settings = config.mongo_settings()?;
            let store = MongoStudentStore::connect(&settings).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Resolves on Ctrl-C or, on unix, SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(event = %Event::ShutdownStart, "shutdown signal received");
}
