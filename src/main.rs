//! Plot resolver service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────────┐
//!                      │                  PLOT RESOLVER                   │
//!                      │                                                  │
//!   GET /r/i/123       │  ┌────────────┐   ┌──────────┐   ┌───────────┐   │
//!   ───────────────────┼─▶│ identifier │──▶│ listing  │──▶│ canonical │   │
//!                      │  │  classify  │   │  lookup  │   │   path    │   │
//!                      │  └─────┬──────┘   └────┬─────┘   └─────┬─────┘   │      ┌──────────┐
//!                      │        │ invalid       │ ◀─────────────┼─────────┼──────│ listing  │
//!                      │        ▼               ▼               ▼         │      │  store   │
//!   308 / 301 / 302    │  ┌────────────────────────────────────────────┐  │      └──────────┘
//!   ◀──────────────────┼──│        http::redirect (status policy)      │  │
//!                      │  └────────────────────────────────────────────┘  │
//!                      │                                                  │
//!                      │   config · observability · lifecycle             │
//!                      └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use plot_resolver::config::{load_config, parse_config, STORE_API_KEY_ENV};
use plot_resolver::http::HttpServer;
use plot_resolver::lifecycle::{wait_for_termination, Shutdown};
use plot_resolver::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "plot-resolver")]
#[command(about = "Canonical URL redirect service for land-plot listings", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        // Defaults go through validation too
        None => parse_config("", std::env::var(STORE_API_KEY_ENV).ok())?,
    };

    logging::init(&config.observability);
    tracing::info!("plot-resolver v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        store_backend = ?config.store.backend,
        lookup_timeout_ms = config.store.timeout_ms,
        base_url = ?config.site.base_url,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::from_config(config)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, server_shutdown));

    wait_for_termination().await;
    shutdown.trigger();

    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
