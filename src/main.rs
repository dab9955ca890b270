//! Gateway deployment shim.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                 GATEWAY SHIM                  │
//!                         │                                              │
//!   config + CLI ─────────┼─▶ bootstrap ──▶ factory.create_app() (once)  │
//!                         │        │                                     │
//!                         │   Loaded │ Failed                            │
//!                         │        ▼        ▼                            │
//!                         │  audit + CORS   fallback responder           │
//!                         │        │        │ (500 {"error": ...})       │
//!                         │        └───┬────┘                            │
//!     Client Request ─────┼──────────▶ HttpServer ──▶ upstream gateway ──┼──▶ Gateway
//!                         │                                              │    Process
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use gateway_shim::config::{resolve_config, Overrides};
use gateway_shim::http::HttpServer;
use gateway_shim::lifecycle::{signals, startup, BootstrapCell, Shutdown};
use gateway_shim::observability::logging;

#[derive(Parser)]
#[command(name = "gateway-shim")]
#[command(about = "Serve a conversational-AI gateway with CORS, audit logging and a safe fallback", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "SHIM_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, overriding the config file.
    #[arg(long, env = "SHIM_BIND_ADDRESS")]
    bind: Option<String>,

    /// Upstream gateway base URL, overriding the config file.
    #[arg(long, env = "GATEWAY_UPSTREAM_URL")]
    upstream: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = resolve_config(
        cli.config.as_deref(),
        Overrides {
            bind_address: cli.bind,
            upstream_url: cli.upstream,
        },
    )?;

    logging::init(&config)?;

    tracing::info!("gateway-shim v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        factory = %config.gateway.factory,
        upstream_url = %config.gateway.upstream_url,
        "Configuration loaded"
    );

    // Bootstrap runs before the listener exists, so no request can observe
    // a half-initialized application.
    let cell = BootstrapCell::new();
    let app = startup::start(&config, &cell)?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_shutdown_signal().await;
        shutdown.trigger();
    });

    HttpServer::new(app).run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
