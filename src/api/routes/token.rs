//! Token and contract read endpoints

use crate::api::routes::Envelope;
use crate::api::server::AppState;
use crate::error::RelayError;
use alloy::primitives::Address;
use axum::{
    extract::{Path, State},
    Json,
};

/// Greeting at the API root
pub async fn hello() -> &'static str {
    "Hello World!"
}

pub async fn contract_address(State(state): State<AppState>) -> Json<Envelope<String>> {
    Envelope::json(state.relay.contract_address().to_checksum(None))
}

pub async fn token_name(
    State(state): State<AppState>,
) -> Result<Json<Envelope<String>>, RelayError> {
    Ok(Envelope::json(state.relay.token_name().await?))
}

pub async fn total_supply(
    State(state): State<AppState>,
) -> Result<Json<Envelope<String>>, RelayError> {
    Ok(Envelope::json(state.relay.total_supply().await?))
}

pub async fn token_balance(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<Envelope<String>>, RelayError> {
    let account: Address = address
        .trim()
        .parse()
        .map_err(|_| RelayError::InvalidAddress(address.clone()))?;

    Ok(Envelope::json(state.relay.token_balance(account).await?))
}
