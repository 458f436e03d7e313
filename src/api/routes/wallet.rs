//! Server wallet endpoints: address, token purchase, receipt lookup

use crate::api::routes::Envelope;
use crate::api::server::AppState;
use crate::chain::{ReceiptStatus, TxOutcome};
use crate::error::RelayError;
use alloy::primitives::TxHash;
use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

/// Buy tokens request
#[derive(Debug, Deserialize)]
pub struct BuyTokensRequest {
    /// Ether to spend, as a decimal string
    pub amount: String,
}

/// Buy tokens response.
///
/// Both legs are reported so a purchase that fails after a granted
/// approval is visible to the caller.
#[derive(Debug, Serialize)]
pub struct BuyTokensResponse {
    pub result: ReceiptStatus,
    pub approval: TxOutcome,
    pub purchase: Option<TxOutcome>,
}

/// Query params for receipt endpoint
#[derive(Debug, Deserialize)]
pub struct ReceiptQuery {
    pub hash: Option<String>,
}

pub async fn server_wallet_address(State(state): State<AppState>) -> Json<Envelope<String>> {
    Envelope::json(state.relay.server_wallet_address().to_checksum(None))
}

pub async fn buy_tokens(
    State(state): State<AppState>,
    Json(req): Json<BuyTokensRequest>,
) -> Result<Json<BuyTokensResponse>, RelayError> {
    let purchase = state.relay.buy_tokens(&req.amount).await?;

    Ok(Json(BuyTokensResponse {
        result: purchase.status(),
        approval: purchase.approval,
        purchase: purchase.purchase,
    }))
}

pub async fn transaction_receipt(
    State(state): State<AppState>,
    Query(query): Query<ReceiptQuery>,
) -> Result<Json<Envelope<ReceiptStatus>>, RelayError> {
    let raw = query
        .hash
        .ok_or_else(|| RelayError::InvalidHash("missing hash".to_string()))?;
    let hash: TxHash = raw
        .trim()
        .parse()
        .map_err(|_| RelayError::InvalidHash(raw.clone()))?;

    Ok(Envelope::json(state.relay.transaction_receipt(hash).await?))
}
