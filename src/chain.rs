//! Chain client seam
//!
//! The relay speaks to the chain only through [`ChainClient`]: raw contract
//! calls, signed sends from the server account, and receipt lookups. The
//! production implementation is [`AlloyChain`], an alloy HTTP provider with
//! the server wallet attached and the recommended gas/nonce/chain-id fillers.

use crate::error::RelayError;
use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

/// Final state of a mined transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

impl ReceiptStatus {
    pub fn from_success(success: bool) -> Self {
        if success {
            Self::Success
        } else {
            Self::Reverted
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Reverted => "reverted",
        }
    }
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the relay keeps from a receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutcome {
    pub hash: TxHash,
    pub status: ReceiptStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub gas_used: u64,
}

impl TxOutcome {
    fn from_receipt(receipt: &TransactionReceipt) -> Self {
        Self {
            hash: receipt.transaction_hash,
            status: ReceiptStatus::from_success(receipt.status()),
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        }
    }
}

/// Everything the relay needs from the chain
#[async_trait]
pub trait ChainClient: Send + Sync + 'static {
    /// Address that signs every write
    fn signer_address(&self) -> Address;

    /// Read-only `eth_call` against `to`
    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, RelayError>;

    /// Sign and broadcast a transaction from the server account
    async fn send(&self, to: Address, input: Bytes, value: U256) -> Result<TxHash, RelayError>;

    /// Receipt for `hash` if the transaction has been mined
    async fn receipt(&self, hash: TxHash) -> Result<Option<TxOutcome>, RelayError>;

    /// Block until a receipt for `hash` shows up. No timeout.
    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxOutcome, RelayError>;
}

/// Alloy-backed chain client
pub struct AlloyChain {
    provider: DynProvider,
    signer_address: Address,
    poll_interval: Duration,
}

impl AlloyChain {
    pub fn connect(rpc_url: &str, private_key: &str, poll_interval: Duration) -> Result<Self> {
        let signer = parse_signer(private_key)?;
        let signer_address = signer.address();

        let url: reqwest::Url = rpc_url
            .parse()
            .with_context(|| format!("Invalid RPC URL: {}", rpc_url))?;

        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();

        Ok(Self {
            provider,
            signer_address,
            poll_interval,
        })
    }
}

/// Build the server signer from a hex key, with or without `0x`
pub fn parse_signer(private_key: &str) -> Result<PrivateKeySigner> {
    let key = private_key.trim();
    let key = key.strip_prefix("0x").unwrap_or(key);
    key.parse::<PrivateKeySigner>()
        .context("Failed to parse private key")
}

#[async_trait]
impl ChainClient for AlloyChain {
    fn signer_address(&self) -> Address {
        self.signer_address
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, RelayError> {
        let tx = TransactionRequest::default().with_to(to).with_input(input);
        self.provider.call(tx).await.map_err(RelayError::rpc)
    }

    async fn send(&self, to: Address, input: Bytes, value: U256) -> Result<TxHash, RelayError> {
        let tx = TransactionRequest::default()
            .with_from(self.signer_address)
            .with_to(to)
            .with_input(input)
            .with_value(value);

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(RelayError::rpc)?;
        Ok(*pending.tx_hash())
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<TxOutcome>, RelayError> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(RelayError::rpc)?;
        Ok(receipt.as_ref().map(TxOutcome::from_receipt))
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxOutcome, RelayError> {
        let mut polls = 0u64;
        loop {
            if let Some(outcome) = self.receipt(hash).await? {
                info!(
                    "Receipt for {}: {} (block {:?}, gas {})",
                    hash, outcome.status, outcome.block_number, outcome.gas_used
                );
                return Ok(outcome);
            }
            polls += 1;
            debug!("No receipt yet for {} after {} polls", hash, polls);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
