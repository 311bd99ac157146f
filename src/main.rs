//! curl-relay
//!
//! A minimal HTTP relay built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────────────┐
//!                 │                      CURL RELAY                      │
//!                 │                                                      │
//!  POST /curl     │  ┌─────────┐   ┌──────────┐   ┌──────────────────┐   │
//!  ───────────────┼─▶│  http   │──▶│  store   │──▶│ relay::executor  │───┼──▶ Origin
//!                 │  │ server  │   │ (id +    │   │   (reqwest)      │   │
//!                 │  └────┬────┘   │ request) │   └────────┬─────────┘   │
//!                 │       │        └──────────┘            │             │
//!                 │       │        ┌──────────┐            │             │
//!  JSON summary   │       │        │  store   │◀───────────┘             │
//!  ◀──────────────┼───────┘◀───────│(response)│                          │
//!                 │                └──────────┘                          │
//!                 │                                                      │
//!                 │  admin (lookup) · config · observability · lifecycle │
//!                 └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use curl_relay::config::{load_config, RelayConfig};
use curl_relay::observability::{logging, metrics};
use curl_relay::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "curl-relay", version, about = "Minimal HTTP relay", long_about = None)]
struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    logging::init_logging(&config.observability.log_filter);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        path = %config.relay.path,
        config_file = ?args.config,
        "curl-relay starting"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!(error = %e, "Failed to start Prometheus exporter");
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
