//! Yield gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                 YIELD GATEWAY                │
//!   HTTP request   │  ┌────────┐    ┌──────────┐    ┌──────────┐  │
//!  ────────────────┼─▶│  http  │───▶│ gateway  │───▶│blockchain│──┼──▶ JSON-RPC node
//!                  │  │handlers│    │ service  │    │  client  │  │
//!                  │  └────────┘    └────┬─────┘    └──────────┘  │
//!                  │                     │                        │
//!                  │               ┌─────▼──────┐                 │
//!                  │               │ projection │                 │
//!                  │               └────────────┘                 │
//!                  └──────────────────────────────────────────────┘
//! ```
//!
//! Environment: `RPC_URL`, `PRIVATE_KEY`, `PORT` (a `.env` file is honored).

use std::path::PathBuf;

use clap::Parser;

use yield_gateway::config::{load_config, load_env_file};
use yield_gateway::lifecycle::{signals, startup, Shutdown};
use yield_gateway::observability::{self, metrics};

#[derive(Parser)]
#[command(name = "yield-gateway")]
#[command(about = "HTTP gateway for lending-pool deposits and yield projections", long_about = None)]
struct Cli {
    /// Optional TOML config file; environment variables override it.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// `.env` file to load; defaults to searching for `.env` upward from the
    /// working directory.
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let env_file = load_env_file(cli.env_file.as_deref())?;
    let config = load_config(cli.config.as_deref())?;
    observability::init_logging(&config.observability.log_level);

    if let Some(path) = &env_file {
        tracing::info!(path = %path.display(), "Loaded .env file");
    }

    tracing::info!("yield-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        port = config.listener.port,
        chain_id = config.blockchain.chain_id,
        request_timeout_secs = config.timeouts.request_secs,
        confirmation_timeout_secs = config.blockchain.confirmation_timeout_secs,
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

    let (server, listener) = startup::bootstrap(config).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
