//! Configuration management for the relay

use alloy::primitives::Address;
use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::time::Duration;

/// Relay configuration loaded from environment
#[derive(Clone)]
pub struct Config {
    /// HTTP JSON-RPC endpoint of the chain
    pub rpc_url: String,

    /// Server wallet private key (hex, `0x` prefix optional)
    pub private_key: String,

    /// Deployed game contract
    pub game_address: Address,

    /// Host to bind the HTTP server to
    pub host: String,

    /// Port to bind the HTTP server to
    pub port: u16,

    /// Prefix for every API route, e.g. `/api`. Empty means root.
    pub base_path: String,

    /// How often to poll for a transaction receipt
    pub receipt_poll_interval: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let rpc_url = required("RPC_ENDPOINT_URL")?;
        let private_key = required("PRIVATE_KEY")?;

        let game_address = required("BET_ETH_GAME_ADDRESS")?
            .parse::<Address>()
            .context("BET_ETH_GAME_ADDRESS is not a valid address")?;

        let host = env::var("HOST")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "0.0.0.0".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3001);

        let base_path = normalize_base_path(&env::var("API_BASE_PATH").unwrap_or_default());

        let receipt_poll_interval = env::var("RECEIPT_POLL_INTERVAL_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(4000));

        Ok(Self {
            rpc_url,
            private_key,
            game_address,
            host,
            port,
            base_path,
            receipt_poll_interval,
        })
    }

    /// Socket address string for the listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("game_address", &self.game_address)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("base_path", &self.base_path)
            .field("receipt_poll_interval", &self.receipt_poll_interval)
            .finish()
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .with_context(|| format!("{} must be set", name))
}

/// Turn `api`, `/api/` or `/` into `/api`, `/api` and `""`
fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
