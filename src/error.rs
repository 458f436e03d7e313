//! Relay error type and its HTTP mapping

use alloy::primitives::TxHash;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid transaction hash: {0}")]
    InvalidHash(String),

    #[error("Invalid ether amount: {0:?}")]
    InvalidAmount(String),

    #[error("No receipt found for transaction {0}")]
    ReceiptNotFound(TxHash),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Failed to decode contract return data: {0}")]
    Decode(String),

    /// Transaction was broadcast but its receipt could not be fetched.
    /// It may still be mined.
    #[error("Transaction {hash} was submitted but its receipt is unknown: {source}")]
    ReceiptWait {
        hash: TxHash,
        #[source]
        source: Box<RelayError>,
    },

    /// Approval landed but the purchase did not. The allowance stays in force.
    #[error(
        "Purchase failed after approval {approval} succeeded{}: {source}",
        pending_suffix(.purchase)
    )]
    PurchaseAborted {
        approval: TxHash,
        /// Purchase hash if it was broadcast before the failure
        purchase: Option<TxHash>,
        #[source]
        source: Box<RelayError>,
    },
}

fn pending_suffix(purchase: &Option<TxHash>) -> String {
    match purchase {
        Some(hash) => format!(" (purchase {} still pending)", hash),
        None => String::new(),
    }
}

impl RelayError {
    pub fn rpc(err: impl std::fmt::Display) -> Self {
        Self::Rpc(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidAddress(_) | Self::InvalidHash(_) | Self::InvalidAmount(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::ReceiptNotFound(_) => StatusCode::NOT_FOUND,
            Self::Rpc(_)
            | Self::Decode(_)
            | Self::ReceiptWait { .. }
            | Self::PurchaseAborted { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Hash of a transaction that was broadcast before this error, if any
    pub fn submitted_hash(&self) -> Option<TxHash> {
        match self {
            Self::ReceiptWait { hash, .. } => Some(*hash),
            _ => None,
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!("Request failed ({}): {}", status.as_u16(), self);
        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
