//! Game relay
//!
//! Turns each API operation into contract reads, or signed writes followed by
//! a receipt wait, against the configured game contract.

use crate::chain::{ChainClient, ReceiptStatus, TxOutcome};
use crate::contracts::{IBetEthGame, IBethEthToken};
use crate::error::RelayError;
use crate::units::{format_units, parse_ether};
use alloy::primitives::{Address, TxHash, U256};
use alloy::sol_types::SolCall;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const BETS_OPEN: &str = "Bets are open";
pub const BETS_CLOSED: &str = "Bets are closed";

/// Result of the approve-then-purchase sequence.
///
/// `purchase` is `None` when the approval reverted and nothing else was sent.
#[derive(Debug, Clone, Serialize)]
pub struct Purchase {
    pub approval: TxOutcome,
    pub purchase: Option<TxOutcome>,
}

impl Purchase {
    /// Overall status: the purchase's, or the approval's if it never got that far
    pub fn status(&self) -> ReceiptStatus {
        match &self.purchase {
            Some(purchase) => purchase.status,
            None => self.approval.status,
        }
    }
}

pub struct Relay {
    chain: Arc<dyn ChainClient>,
    game: Address,
}

impl Relay {
    pub fn new(chain: Arc<dyn ChainClient>, game: Address) -> Self {
        Self { chain, game }
    }

    pub fn contract_address(&self) -> Address {
        self.game
    }

    pub fn server_wallet_address(&self) -> Address {
        self.chain.signer_address()
    }

    async fn read<C: SolCall>(&self, to: Address, call: C) -> Result<C::Return, RelayError> {
        debug!("eth_call {} on {}", C::SIGNATURE, to);
        let output = self.chain.call(to, call.abi_encode().into()).await?;
        C::abi_decode_returns(&output).map_err(RelayError::decode)
    }

    async fn write<C: SolCall>(
        &self,
        to: Address,
        call: C,
        value: U256,
    ) -> Result<TxOutcome, RelayError> {
        let hash = self.chain.send(to, call.abi_encode().into(), value).await?;
        info!("{} submitted to {}: {}", C::SIGNATURE, to, hash);

        let outcome = self
            .chain
            .wait_for_receipt(hash)
            .await
            .map_err(|e| {
                warn!("{} submitted as {} but receipt failed: {}", C::SIGNATURE, hash, e);
                RelayError::ReceiptWait {
                    hash,
                    source: Box::new(e),
                }
            })?;
        if outcome.status == ReceiptStatus::Reverted {
            warn!("{} reverted: {}", C::SIGNATURE, hash);
        } else {
            info!("{} confirmed: {}", C::SIGNATURE, hash);
        }
        Ok(outcome)
    }

    /// `"<amount> <symbol>"` using the game token's decimals
    async fn format_token_amount(&self, raw: U256) -> Result<String, RelayError> {
        let symbol = self.read(self.game, IBetEthGame::symbolCall {}).await?;
        let decimals = self.read(self.game, IBetEthGame::decimalsCall {}).await?;
        Ok(format!("{} {}", format_units(raw, decimals), symbol))
    }

    // ==================== READS ====================

    pub async fn token_name(&self) -> Result<String, RelayError> {
        self.read(self.game, IBetEthGame::nameCall {}).await
    }

    pub async fn total_supply(&self) -> Result<String, RelayError> {
        let supply = self.read(self.game, IBetEthGame::totalSupplyCall {}).await?;
        self.format_token_amount(supply).await
    }

    pub async fn token_balance(&self, account: Address) -> Result<String, RelayError> {
        let balance = self
            .read(self.game, IBetEthGame::balanceOfCall { account })
            .await?;
        self.format_token_amount(balance).await
    }

    pub async fn bets_open(&self) -> Result<bool, RelayError> {
        self.read(self.game, IBetEthGame::betsOpenCall {}).await
    }

    pub async fn bets_open_message(&self) -> Result<&'static str, RelayError> {
        Ok(if self.bets_open().await? {
            BETS_OPEN
        } else {
            BETS_CLOSED
        })
    }

    pub async fn winner(&self) -> Result<Address, RelayError> {
        self.read(self.game, IBetEthGame::winnerCall {}).await
    }

    pub async fn eth_usd_price(&self) -> Result<String, RelayError> {
        let price = self.read(self.game, IBetEthGame::getEthUsdPriceCall {}).await?;
        Ok(price.to_string())
    }

    /// Status of an already-submitted transaction
    pub async fn transaction_receipt(&self, hash: TxHash) -> Result<ReceiptStatus, RelayError> {
        let outcome = self
            .chain
            .receipt(hash)
            .await?
            .ok_or(RelayError::ReceiptNotFound(hash))?;
        debug!("Receipt for {}: {:?}", hash, outcome);
        Ok(outcome.status)
    }

    // ==================== WRITES ====================

    pub async fn open_bets(&self) -> Result<TxOutcome, RelayError> {
        self.write(self.game, IBetEthGame::openBetsCall {}, U256::ZERO)
            .await
    }

    pub async fn close_bets(&self) -> Result<TxOutcome, RelayError> {
        self.write(self.game, IBetEthGame::closeBetsCall {}, U256::ZERO)
            .await
    }

    /// Place a bet. The prediction is passed through untouched.
    pub async fn bet(&self, prediction: String) -> Result<TxOutcome, RelayError> {
        self.write(self.game, IBetEthGame::betCall { prediction }, U256::ZERO)
            .await
    }

    pub async fn set_winner(&self) -> Result<TxOutcome, RelayError> {
        self.write(self.game, IBetEthGame::setWinnerCall {}, U256::ZERO)
            .await
    }

    /// Approve the game for an unlimited token allowance, then purchase
    /// tokens with `amount` ether attached.
    ///
    /// No compensation: if the purchase fails the allowance stays granted,
    /// and the error carries the approval hash plus the purchase hash when
    /// it was already broadcast.
    pub async fn buy_tokens(&self, amount: &str) -> Result<Purchase, RelayError> {
        let value = parse_ether(amount)?;

        let token = self.read(self.game, IBetEthGame::bethEthTokenCall {}).await?;
        debug!("Game token contract: {}", token);

        let approval = self
            .write(
                token,
                IBethEthToken::approveCall {
                    spender: self.game,
                    amount: U256::MAX,
                },
                U256::ZERO,
            )
            .await?;

        if approval.status == ReceiptStatus::Reverted {
            warn!("Approval {} reverted, skipping purchase", approval.hash);
            return Ok(Purchase {
                approval,
                purchase: None,
            });
        }

        let purchase = self
            .write(self.game, IBetEthGame::purchaseTokensCall {}, value)
            .await
            .map_err(|e| RelayError::PurchaseAborted {
                approval: approval.hash,
                purchase: e.submitted_hash(),
                source: Box::new(e),
            })?;

        Ok(Purchase {
            approval,
            purchase: Some(purchase),
        })
    }
}
