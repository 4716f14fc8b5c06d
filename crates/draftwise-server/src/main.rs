//! Draftwise API server binary.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use draftwise_core::advisor::Advisor;
use tracing_subscriber::EnvFilter;

use draftwise_server::state::AppState;

/// Draftwise API server — serves the draft advisor REST API.
#[derive(Parser)]
#[command(name = "draftwise-server", version, about)]
struct Cli {
    /// Port to listen on.
    #[arg(long, default_value = "8900")]
    port: u16,

    /// Host address to bind to. Use 0.0.0.0 for LAN access.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Directory containing the knowledge-base JSON files.
    #[arg(long, default_value = "./data")]
    data_dir: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing (respects RUST_LOG env var).
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    tracing::info!(
        host = %cli.host,
        port = cli.port,
        data_dir = %cli.data_dir,
        "starting draftwise server"
    );

    let state = Arc::new(AppState {
        advisor: Advisor::new(&cli.data_dir),
    });

    let listener = tokio::net::TcpListener::bind((cli.host.as_str(), cli.port)).await?;
    axum::serve(listener, draftwise_server::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
