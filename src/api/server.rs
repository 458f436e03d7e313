//! Axum server setup and configuration

use crate::api::routes;
use crate::chain::{AlloyChain, ChainClient};
use crate::{Config, Relay};
use anyhow::Result;
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Relay) -> Self {
        Self {
            relay: Arc::new(relay),
        }
    }

    /// Build the chain client and relay once for the whole process
    pub fn from_config(config: &Config) -> Result<Self> {
        let chain: Arc<dyn ChainClient> = Arc::new(AlloyChain::connect(
            &config.rpc_url,
            &config.private_key,
            config.receipt_poll_interval,
        )?);
        Ok(Self::new(Relay::new(chain, config.game_address)))
    }
}

/// Create the Axum application with all routes.
///
/// `base_path` is either empty or a normalized prefix such as `/api`.
pub fn create_app(state: AppState, base_path: &str) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/", get(routes::token::hello))
        // Contract and token reads
        .route("/contract-address", get(routes::token::contract_address))
        .route("/token-name", get(routes::token::token_name))
        .route("/total-supply", get(routes::token::total_supply))
        .route("/token-balance/:address", get(routes::token::token_balance))
        // Server wallet
        .route("/transaction-receipt", get(routes::wallet::transaction_receipt))
        .route("/server-wallet-address", get(routes::wallet::server_wallet_address))
        .route("/buy-tokens", post(routes::wallet::buy_tokens))
        // Game
        .route("/are-bets-open", get(routes::game::are_bets_open))
        .route("/open-bets", post(routes::game::open_bets))
        .route("/close-bets", post(routes::game::close_bets))
        .route("/bet", post(routes::game::bet))
        .route("/Set-winner", post(routes::game::set_winner))
        .route("/get-winner", get(routes::game::get_winner))
        .route("/get-eth-usd-price", get(routes::game::eth_usd_price));

    let app = if base_path.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(base_path, api_routes)
    };

    app.route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
