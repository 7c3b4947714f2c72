//! git-gateway
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http server ──▶ routing table ──▶ no match ──▶ 403 Forbidden
//!                                          │
//!                                          ▼
//!                                   handler chain
//!                          ┌───────────────┴───────────────┐
//!                          ▼                               ▼
//!                authorization stage  ──delegated──▶  authorization
//!                (fills decision)        request        backend
//!                          │
//!                          ▼
//!                  capability stage ──▶ Client Response
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use git_gateway::lifecycle::signals::wait_for_signal;
use git_gateway::lifecycle::startup::{prepare_config, Overrides};
use git_gateway::observability::{logging, metrics};
use git_gateway::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "git-gateway", version)]
#[command(about = "Routing and authorization front door for Git over HTTP", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding listener.bind_address.
    #[arg(long)]
    listen_addr: Option<String>,

    /// Authorization backend base URL, overriding auth_backend.url.
    #[arg(long)]
    auth_backend: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = prepare_config(
        cli.config.as_deref(),
        Overrides {
            listen_addr: cli.listen_addr,
            auth_backend: cli.auth_backend,
        },
    )?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "git-gateway starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        auth_backend = %config.auth_backend.url,
        auth_timeout_secs = config.auth_backend.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already checked by validation.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
