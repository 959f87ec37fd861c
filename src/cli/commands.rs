//! CLI command implementations
//!
//! Startup is fail-fast: configuration, connection, ping, and sequence
//! priming must all succeed before the listener is bound. Any failure
//! returns a `CliError` and the process exits non-zero.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{AppConfig, StoreSettings};
use crate::http_server::{shutdown_signal, HttpServer, SinaxarioState};
use crate::logging::init_logging;
use crate::service::RecordService;
use crate::store::{InMemoryStore, MongoStore, SharedStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Options for `serve`
#[derive(Debug, Clone, Default)]
pub struct ServeOptions {
    pub env_file: Option<PathBuf>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub in_memory: bool,
}

/// Parse arguments and run the chosen command on a fresh runtime
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(run_command(cli.command))
}

/// Dispatch a parsed command
pub async fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            env_file,
            host,
            port,
            in_memory,
        } => {
            serve(ServeOptions {
                env_file,
                host,
                port,
                in_memory,
            })
            .await
        }
        Command::Ping { env_file } => ping(env_file.as_deref()).await,
    }
}

/// Open the configured store. For MongoDB this connects and pings.
pub async fn open_store(settings: &StoreSettings) -> CliResult<SharedStore> {
    match settings {
        StoreSettings::Mongo(mongo) => {
            let store = MongoStore::connect(mongo).await?;
            Ok(Arc::new(store))
        }
        StoreSettings::InMemory => {
            tracing::warn!("Using in-memory store; records are lost on exit");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

/// Boot and serve until a shutdown signal
pub async fn serve(options: ServeOptions) -> CliResult<()> {
    let mut config = AppConfig::load(options.env_file.as_deref(), options.in_memory)?;
    if let Some(host) = options.host {
        config.http.host = host;
    }
    if let Some(port) = options.port {
        config.http.port = port;
    }

    init_logging(config.log_format);
    tracing::info!(
        store = config.store.kind(),
        addr = %config.http.socket_addr(),
        "Configuration loaded"
    );

    let store = open_store(&config.store).await?;
    let service = RecordService::new(store);
    service.prepare().await?;

    let state = Arc::new(SinaxarioState::new(service));
    HttpServer::new(config.http, state)
        .start(shutdown_signal())
        .await?;

    Ok(())
}

/// Connect, ping, report, exit
pub async fn ping(env_file: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load(env_file, false)?;
    init_logging(config.log_format);

    let store = open_store(&config.store).await?;
    let count = store.count().await?;

    println!("Pinged your deployment. {} sinaxario records stored.", count);
    Ok(())
}
