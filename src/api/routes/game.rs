//! Betting round endpoints

use crate::api::routes::Envelope;
use crate::api::server::AppState;
use crate::chain::ReceiptStatus;
use crate::error::RelayError;
use axum::{extract::State, Json};
use serde::Deserialize;

/// Bet request
#[derive(Debug, Deserialize)]
pub struct BetRequest {
    pub prediction: String,
}

pub async fn are_bets_open(
    State(state): State<AppState>,
) -> Result<Json<Envelope<&'static str>>, RelayError> {
    Ok(Envelope::json(state.relay.bets_open_message().await?))
}

pub async fn open_bets(
    State(state): State<AppState>,
) -> Result<Json<Envelope<ReceiptStatus>>, RelayError> {
    let outcome = state.relay.open_bets().await?;
    Ok(Envelope::json(outcome.status))
}

pub async fn close_bets(
    State(state): State<AppState>,
) -> Result<Json<Envelope<ReceiptStatus>>, RelayError> {
    let outcome = state.relay.close_bets().await?;
    Ok(Envelope::json(outcome.status))
}

pub async fn bet(
    State(state): State<AppState>,
    Json(req): Json<BetRequest>,
) -> Result<Json<Envelope<ReceiptStatus>>, RelayError> {
    let outcome = state.relay.bet(req.prediction).await?;
    Ok(Envelope::json(outcome.status))
}

pub async fn set_winner(
    State(state): State<AppState>,
) -> Result<Json<Envelope<ReceiptStatus>>, RelayError> {
    let outcome = state.relay.set_winner().await?;
    Ok(Envelope::json(outcome.status))
}

pub async fn get_winner(
    State(state): State<AppState>,
) -> Result<Json<Envelope<String>>, RelayError> {
    let winner = state.relay.winner().await?;
    Ok(Envelope::json(winner.to_checksum(None)))
}

pub async fn eth_usd_price(
    State(state): State<AppState>,
) -> Result<Json<Envelope<String>>, RelayError> {
    Ok(Envelope::json(state.relay.eth_usd_price().await?))
}
