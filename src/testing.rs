//! Recording chain client for unit and HTTP tests

use crate::chain::{ChainClient, ReceiptStatus, TxOutcome};
use crate::error::RelayError;
use alloy::primitives::{address, Address, Bytes, TxHash, U256};
use alloy::sol_types::{SolCall, SolValue};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub const SERVER_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub fn game_address() -> Address {
    Address::repeat_byte(0x11)
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub to: Address,
    pub input: Bytes,
}

#[derive(Debug, Clone)]
pub struct SentTx {
    pub hash: TxHash,
    pub to: Address,
    pub input: Bytes,
    pub value: U256,
}

impl SentTx {
    pub fn selector(&self) -> [u8; 4] {
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&self.input[..4]);
        selector
    }
}

#[derive(Default)]
pub struct MockChain {
    unreachable: bool,
    reads: HashMap<[u8; 4], Bytes>,
    send_statuses: Mutex<VecDeque<ReceiptStatus>>,
    fail_send_at: Option<usize>,
    fail_wait_at: Option<usize>,
    calls: Mutex<Vec<RecordedCall>>,
    sent: Mutex<Vec<SentTx>>,
    receipts: Mutex<HashMap<TxHash, TxOutcome>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request fails as if the RPC endpoint were down
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    /// Answer calls to `C` with `value` encoded as contract return data
    pub fn with_read<C: SolCall>(self, value: impl SolValue) -> Self {
        self.with_raw_read(C::SELECTOR, value.abi_encode())
    }

    pub fn with_raw_read(mut self, selector: [u8; 4], data: Vec<u8>) -> Self {
        self.reads.insert(selector, data.into());
        self
    }

    /// Receipt statuses handed out to sends in order; `Success` once drained
    pub fn with_send_statuses(self, statuses: Vec<ReceiptStatus>) -> Self {
        *self.send_statuses.lock().unwrap() = statuses.into();
        self
    }

    /// Make the nth send (zero-based) fail
    pub fn failing_send_at(mut self, index: usize) -> Self {
        self.fail_send_at = Some(index);
        self
    }

    /// Make waiting on the nth sent transaction fail after it was broadcast
    pub fn failing_wait_at(mut self, index: usize) -> Self {
        self.fail_wait_at = Some(index);
        self
    }

    pub fn with_receipt(self, hash: TxHash, status: ReceiptStatus) -> Self {
        self.receipts.lock().unwrap().insert(
            hash,
            TxOutcome {
                hash,
                status,
                block_number: Some(1),
                gas_used: 21_000,
            },
        );
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<SentTx> {
        self.sent.lock().unwrap().clone()
    }

    fn check_reachable(&self) -> Result<(), RelayError> {
        if self.unreachable {
            Err(RelayError::rpc("error sending request: connection refused"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ChainClient for MockChain {
    fn signer_address(&self) -> Address {
        SERVER_ADDRESS
    }

    async fn call(&self, to: Address, input: Bytes) -> Result<Bytes, RelayError> {
        self.check_reachable()?;
        self.calls.lock().unwrap().push(RecordedCall {
            to,
            input: input.clone(),
        });

        let mut selector = [0u8; 4];
        selector.copy_from_slice(&input[..4]);
        self.reads
            .get(&selector)
            .cloned()
            .ok_or_else(|| RelayError::rpc("execution reverted"))
    }

    async fn send(&self, to: Address, input: Bytes, value: U256) -> Result<TxHash, RelayError> {
        self.check_reachable()?;

        let mut sent = self.sent.lock().unwrap();
        let index = sent.len();
        if self.fail_send_at == Some(index) {
            return Err(RelayError::rpc("insufficient funds for gas * price + value"));
        }

        let hash = TxHash::with_last_byte(index as u8 + 1);
        sent.push(SentTx {
            hash,
            to,
            input,
            value,
        });

        let status = self
            .send_statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(ReceiptStatus::Success);
        self.receipts.lock().unwrap().insert(
            hash,
            TxOutcome {
                hash,
                status,
                block_number: Some(100 + index as u64),
                gas_used: 50_000,
            },
        );
        Ok(hash)
    }

    async fn receipt(&self, hash: TxHash) -> Result<Option<TxOutcome>, RelayError> {
        self.check_reachable()?;
        Ok(self.receipts.lock().unwrap().get(&hash).cloned())
    }

    async fn wait_for_receipt(&self, hash: TxHash) -> Result<TxOutcome, RelayError> {
        if let Some(index) = self.fail_wait_at {
            if hash == TxHash::with_last_byte(index as u8 + 1) {
                return Err(RelayError::rpc("502 bad gateway"));
            }
        }
        self.receipt(hash)
            .await?
            .ok_or_else(|| RelayError::rpc(format!("transaction {} never mined", hash)))
    }
}
