//! BetEth Relay Library
//!
//! A thin REST relay in front of the BetEth prediction game contract:
//!
//! 1. **Reads**: token name, supply, balances, bet status, winner and the
//!    ETH/USD price, each a fresh `eth_call` with display formatting.
//!
//! 2. **Writes**: open/close bets, place a bet, set the winner and buy
//!    tokens, each signed by the server wallet and awaited until mined.

pub mod api;
pub mod chain;
pub mod config;
pub mod contracts;
pub mod error;
pub mod relay;
pub mod units;

#[cfg(test)]
pub(crate) mod testing;

pub use chain::{AlloyChain, ChainClient, ReceiptStatus, TxOutcome};
pub use config::Config;
pub use error::RelayError;
pub use relay::{Purchase, Relay};
