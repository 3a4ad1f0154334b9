use alloy::primitives::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wallet error code for "this chain has not been added to the wallet".
pub const UNRECOGNIZED_CHAIN_CODE: i64 = 4902;

pub const SUBMIT_MESSAGE_METHOD: &str = "submitMessage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDescriptor {
    pub chain_id: u64,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
    pub block_explorer_urls: Vec<String>,
}

impl NetworkDescriptor {
    pub fn shibuya() -> Self {
        Self {
            chain_id: 81,
            chain_name: "Astar Shibuya".to_owned(),
            rpc_urls: vec!["https://evm.shibuya.astar.network".to_owned()],
            native_currency: NativeCurrency {
                name: "SBY".to_owned(),
                symbol: "SBY".to_owned(),
                decimals: 18,
            },
            block_explorer_urls: vec!["https://shibuya.blockscout.com/".to_owned()],
        }
    }

    /// Chain id in the `0x`-prefixed lowercase form wallets return from `eth_chainId`.
    pub fn chain_id_hex(&self) -> String {
        format!("{:#x}", self.chain_id)
    }

    pub fn switch_chain_params(&self) -> Value {
        serde_json::json!([{ "chainId": self.chain_id_hex() }])
    }

    pub fn add_chain_params(&self) -> Value {
        serde_json::json!([{
            "chainId": self.chain_id_hex(),
            "rpcUrls": self.rpc_urls,
            "chainName": self.chain_name,
            "nativeCurrency": {
                "name": self.native_currency.name,
                "symbol": self.native_currency.symbol,
                "decimals": self.native_currency.decimals,
            },
            "blockExplorerUrls": self.block_explorer_urls,
        }])
    }

    pub fn explorer_tx_url(&self, tx_hash: &str) -> Option<String> {
        self.block_explorer_urls
            .first()
            .map(|base| format!("{}/tx/{tx_hash}", base.trim_end_matches('/')))
    }
}

impl Default for NetworkDescriptor {
    fn default() -> Self {
        Self::shibuya()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, message)
    }
}

/// The single form field: the contract the gateway should relay the message to.
/// Accepted as-is; no address format check happens before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub contract: String,
}

impl FormInput {
    pub fn new(contract: impl Into<String>) -> Self {
        Self {
            contract: contract.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayMessage {
    pub destination: String,
    pub message_code: u64,
    pub gas_budget: u64,
    pub payload: Bytes,
}

impl GatewayMessage {
    /// Arguments in the order `submitMessage` declares them.
    pub fn to_call_args(&self) -> Vec<Value> {
        vec![
            Value::String(self.destination.clone()),
            Value::from(self.message_code),
            Value::from(self.gas_budget),
            Value::String(self.payload.to_string()),
        ]
    }
}
