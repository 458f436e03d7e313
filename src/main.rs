//! BetEth Relay Web Server
//!
//! REST relay between the game frontend and the BetEth contract.

use anyhow::{Context, Result};
use bet_relay::api::{create_app, AppState};
use bet_relay::Config;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bet-relay")]
#[command(about = "REST relay for the BetEth prediction game contract")]
#[command(version)]
struct Cli {
    /// Host to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to bind (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Override with RUST_LOG, e.g. RUST_LOG=bet_relay=debug
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    // Load configuration
    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    info!("Initializing relay for game contract {}", config.game_address);
    let state = AppState::from_config(&config)?;
    info!(
        "Server wallet: {}",
        state.relay.server_wallet_address().to_checksum(None)
    );

    let app = create_app(state, &config.base_path);

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening on http://{}{}", addr, config.base_path);
    info!("Health: http://{}/health", addr);

    // Run the server
    axum::serve(listener, app).await?;

    Ok(())
}
