//! WiRSa update service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Device / browser                    UPDATE SERVICE
//!     ────────────────┐   ┌───────────────────────────────────────────────┐
//!   GET version path ─┼──▶│ axum router ─▶ VersionCheckHandler ─┐         │
//!   GET binary path  ─┼──▶│             ─▶ BinaryProxyHandler  ─┤         │
//!                     │   │                                     ▼         │
//!                     │   │                ReleaseClient ─▶ HttpFetcher ──┼──▶ GitHub API
//!                     │   │                                     │         │    asset host
//!   ◀─────────────────┼───│ response.rs (tag / attachment) ◀────┘         │
//!                     │   └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use wirsa_update::config::{load_config, validate_config, ConfigError, UpdateConfig};
use wirsa_update::observability::{logging, metrics};
use wirsa_update::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "wirsa-update")]
#[command(about = "Latest-release version check and binary proxy for WiRSa firmware", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => UpdateConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    logging::init_logging(&config.observability);

    tracing::info!("wirsa-update v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.api_base_url,
        repository = %format!("{}/{}", config.upstream.owner, config.upstream.repo),
        asset_filename = %config.asset.filename,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
