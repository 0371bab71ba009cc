//! guestbook server
//!
//! Serves the signature API over HTTP from an in-memory store.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use guestbook::api::{http, Api};
use guestbook::{Config, SignatureStore};

#[derive(Parser)]
#[command(name = "guestbook")]
#[command(about = "Signature guestbook HTTP API")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Interface to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// JSON file of signatures to load at startup (overrides config)
    #[arg(long)]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(seed) = cli.seed {
        config.seed_file = Some(seed);
    }

    init_logging(&config.log_level);

    let store = SignatureStore::new();
    if let Some(signatures) = config.read_seed().context("Failed to load seed file")? {
        info!(count = signatures.len(), "seeding signatures");
        store.set_all(signatures);
    }

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    http::serve_with_shutdown(Api::new(store), listener, shutdown_signal())
        .await
        .context("Server error")?;
    Ok(())
}

fn init_logging(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    // ignore error if already initialized
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
