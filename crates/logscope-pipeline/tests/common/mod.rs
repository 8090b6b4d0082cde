//! In-memory `ChainClient` for pipeline tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use alloy_core::dyn_abi::DynSolValue;
use async_trait::async_trait;
use logscope_core::{ChainClient, ClientError, LogEntry, Receipt};

const NAME_SELECTOR: [u8; 4] = [0x06, 0xfd, 0xde, 0x03];
const SYMBOL_SELECTOR: [u8; 4] = [0x95, 0xd8, 0x9b, 0x41];

#[derive(Debug, Clone, Default)]
pub struct MockContract {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub delay: Duration,
}

impl MockContract {
    pub fn token(name: &str, symbol: &str) -> Self {
        Self {
            name: Some(name.into()),
            symbol: Some(symbol.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[derive(Default)]
pub struct MockChain {
    receipts: HashMap<String, Receipt>,
    contracts: HashMap<String, MockContract>,
    receipt_error: Option<ClientError>,
    /// (address, selector) per `call`, in call order
    pub calls: Mutex<Vec<(String, [u8; 4])>>,
    /// addresses in the order their `name()` call completed
    pub completed: Mutex<Vec<String>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_receipt(mut self, receipt: Receipt) -> Self {
        self.receipts.insert(receipt.tx_hash.to_lowercase(), receipt);
        self
    }

    pub fn with_contract(mut self, address: &str, contract: MockContract) -> Self {
        self.contracts.insert(address.to_lowercase(), contract);
        self
    }

    pub fn failing_receipts(mut self, err: ClientError) -> Self {
        self.receipt_error = Some(err);
        self
    }

    pub fn calls_to(&self, address: &str) -> usize {
        let address = address.to_lowercase();
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(a, _)| *a == address)
            .count()
    }
}

#[async_trait]
impl ChainClient for MockChain {
    async fn get_transaction_receipt(&self, tx_hash: &str) -> Result<Option<Receipt>, ClientError> {
        if let Some(err) = &self.receipt_error {
            return Err(err.clone());
        }
        Ok(self.receipts.get(&tx_hash.to_lowercase()).cloned())
    }

    async fn call(&self, to: &str, calldata: &[u8]) -> Result<Vec<u8>, ClientError> {
        let address = to.to_lowercase();
        let selector: [u8; 4] = calldata
            .get(..4)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| ClientError::InvalidResponse("short calldata".into()))?;
        self.calls.lock().unwrap().push((address.clone(), selector));

        // Calls to accounts without code succeed with empty return data.
        let Some(contract) = self.contracts.get(&address) else {
            return Ok(Vec::new());
        };
        if !contract.delay.is_zero() {
            tokio::time::sleep(contract.delay).await;
        }

        let value = match selector {
            NAME_SELECTOR => {
                self.completed.lock().unwrap().push(address.clone());
                contract.name.clone()
            }
            SYMBOL_SELECTOR => contract.symbol.clone(),
            _ => None,
        };
        match value {
            Some(s) => Ok(DynSolValue::Tuple(vec![DynSolValue::String(s)]).abi_encode_params()),
            None => Err(ClientError::Rpc {
                code: 3,
                message: "execution reverted".into(),
            }),
        }
    }

    fn endpoint(&self) -> &str {
        "mock://chain"
    }
}

pub fn word(n: u64) -> Vec<u8> {
    let mut w = vec![0u8; 32];
    w[24..].copy_from_slice(&n.to_be_bytes());
    w
}

pub fn addr_topic(address: &str) -> String {
    format!("0x000000000000000000000000{}", address.trim_start_matches("0x"))
}

pub const TRANSFER: &str = "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef";
pub const SWAP: &str = "0xd78ad95fa46c994b6551d0da85fc275fe613ce37657fb8d5e3d130840159d822";
pub const UNISWAP_V3_SWAP: &str =
    "0xc42079f94a6350d7e6235f29174924f928cc2ac818eb64fed8004e115fbcca67";

pub const USDC: &str = "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48";
pub const PAIR: &str = "0xb4e16d0168e52d35cacd2c6185b44281ec28c9dc";
pub const V3_POOL: &str = "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640";
pub const ROUTER: &str = "0x7a250d5630b4cf539739df2c5dacb4c659f2488d";
pub const USER: &str = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045";

pub const TX: &str = "0x5c504ed432cb51138bcf09aa5e8a410dd4a1e204ef84bfed1be16dfba1b22060";

pub fn transfer_log(token: &str, value: u64, log_index: u64) -> LogEntry {
    LogEntry {
        address: token.into(),
        topics: vec![TRANSFER.into(), addr_topic(PAIR), addr_topic(USER)],
        data: word(value),
        log_index,
    }
}

pub fn swap_log(log_index: u64) -> LogEntry {
    let mut data = Vec::new();
    for n in [0u64, 1_000, 1_850, 0] {
        data.extend(word(n));
    }
    LogEntry {
        address: PAIR.into(),
        topics: vec![SWAP.into(), addr_topic(ROUTER), addr_topic(USER)],
        data,
        log_index,
    }
}

pub fn unknown_log(log_index: u64) -> LogEntry {
    LogEntry {
        address: V3_POOL.into(),
        topics: vec![UNISWAP_V3_SWAP.into(), addr_topic(ROUTER), addr_topic(USER)],
        data: word(1),
        log_index,
    }
}

pub fn receipt(logs: Vec<LogEntry>) -> Receipt {
    Receipt {
        tx_hash: TX.into(),
        block_number: Some(17_000_000),
        status: Some(true),
        logs,
    }
}
