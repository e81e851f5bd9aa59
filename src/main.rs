//! socket-gateway daemon
//!
//! Exposes pre-established TCP connections over HTTP.
//!
//! # Architecture Overview
//!
//! ```text
//!     HTTP client                ┌──────────────────────────────────────────────┐
//!     ──────────────────────────▶│  http server (request id, trace span)        │
//!     GET  /{name}/read/*        │        │                                     │
//!     POST /{name}/write/*       │        ▼                                     │
//!                                │  gateway route table ──▶ codec (bin/txt/     │
//!                                │        │                  base64/json)       │
//!                                │        ▼                                     │
//!                                │  stream adapter (lock, one read / write) ────┼──▶ TCP peer
//!                                └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use socket_gateway::config::{loader, validate_config, ConfigError, GatewayConfig, ResourceConfig};
use socket_gateway::http::GatewayServer;
use socket_gateway::lifecycle::{build_gateway, signals, Shutdown};
use socket_gateway::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "socket-gateway")]
#[command(about = "Expose TCP byte streams as HTTP endpoints", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP listen address; overrides `listener.bind_address`.
    #[arg(long)]
    addr: Option<String>,

    /// Resource to expose, as NAME=HOST:PORT. May be repeated.
    #[arg(short, long = "resource", value_parser = parse_resource)]
    resources: Vec<ResourceConfig>,
}

fn parse_resource(value: &str) -> Result<ResourceConfig, String> {
    match value.split_once('=') {
        Some((name, address)) if !address.is_empty() => Ok(ResourceConfig::new(name, address)),
        _ => Err(format!("expected NAME=HOST:PORT, got {value:?}")),
    }
}

/// Accept the Go-style `:80` shorthand for all interfaces.
fn normalize_addr(addr: String) -> String {
    if addr.starts_with(':') {
        format!("0.0.0.0{addr}")
    } else {
        addr
    }
}

fn load(args: Args) -> Result<GatewayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => loader::read_config(path)?,
        None => GatewayConfig::default(),
    };

    if let Some(addr) = args.addr {
        config.listener.bind_address = normalize_addr(addr);
    }
    config.resources.extend(args.resources);

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load(Args::parse())?;

    logging::init_logging(&config.observability);
    tracing::info!("socket-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        resources = config.resources.len(),
        decode_base64_writes = config.compat.decode_base64_writes,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let gateway = build_gateway(&config).await?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    tokio::spawn(signals::watch_signals(shutdown.clone()));

    let server = GatewayServer::new(&gateway);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
