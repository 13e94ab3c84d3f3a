//! Gesedels Server Binary
//!
//! Main entry point for the Gesedels HTTP server

use clap::Parser;
use gesedels::{GesedelsServer, Result, ServerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Gesedels: a key-value API over plaintext HTTP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Address the server listens on
    #[arg(long, default_value = "127.0.0.1:8080")]
    addr: String,

    /// Path of the database file
    #[arg(long, default_value = "./gesedels.db")]
    path: PathBuf,
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = ServerConfig {
        bind_addr: cli.addr,
        db_path: cli.path,
    };

    let server = Arc::new(GesedelsServer::new(config)?);

    // Setup graceful shutdown on SIGINT (Ctrl+C)
    let server_clone = Arc::clone(&server);
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            return;
        }

        info!("Received Ctrl+C, initiating graceful shutdown...");
        if let Err(e) = server_clone.shutdown() {
            error!("Failed to initiate shutdown: {}", e);
        }
    });

    server.run().await?;

    Ok(())
}
