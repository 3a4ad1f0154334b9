#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use alloy::json_abi::JsonAbi;
use alloy::primitives::Address;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Notify;

use astar_gateway_core::{
    ClockPort, ContractDetails, GatewayCallConfig, NetworkDescriptor, Notice, NoticeLevel,
    NotifierPort, PortError, SubmissionFlow, WalletGateway, WalletTransport,
};

pub const GATEWAY_ADDRESS: &str = "0xF871c929bE8Cd8382148C69053cE5ED1a9593EA7";
pub const TX_HASH: &str = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

pub const GATEWAY_ABI: &str = r#"[{
    "type": "function",
    "name": "submitMessage",
    "stateMutability": "payable",
    "inputs": [
        {"name": "destinationContract", "type": "string"},
        {"name": "messageCode", "type": "uint256"},
        {"name": "gasLimit", "type": "uint256"},
        {"name": "payload", "type": "bytes"}
    ],
    "outputs": []
}]"#;

#[derive(Debug, Clone)]
pub struct WalletScript {
    pub chain_id: String,
    pub accounts: Vec<String>,
    pub switch_error: Option<PortError>,
    pub send_error: Option<PortError>,
    pub tx_hash: String,
}

impl Default for WalletScript {
    fn default() -> Self {
        Self {
            chain_id: "0x51".to_owned(),
            accounts: vec![owner_address().to_string()],
            switch_error: None,
            send_error: None,
            tx_hash: TX_HASH.to_owned(),
        }
    }
}

/// Fake injected wallet that answers from a script and records every request.
#[derive(Debug, Default)]
pub struct ScriptedWallet {
    script: Mutex<WalletScript>,
    calls: Mutex<Vec<(String, Value)>>,
    send_gate: Option<Arc<Notify>>,
}

impl ScriptedWallet {
    pub fn new(script: WalletScript) -> Self {
        Self {
            script: Mutex::new(script),
            calls: Mutex::new(Vec::new()),
            send_gate: None,
        }
    }

    pub fn gated(script: WalletScript, gate: Arc<Notify>) -> Self {
        Self {
            send_gate: Some(gate),
            ..Self::new(script)
        }
    }

    /// Simulates the user switching chains in the wallet UI.
    pub fn set_chain_id(&self, chain_id: &str) {
        self.script.lock().expect("script lock").chain_id = chain_id.to_owned();
    }

    pub fn set_send_error(&self, err: Option<PortError>) {
        self.script.lock().expect("script lock").send_error = err;
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|(m, _)| m == method).count()
    }

    pub fn methods(&self) -> Vec<String> {
        self.calls().into_iter().map(|(m, _)| m).collect()
    }
}

#[async_trait]
impl WalletTransport for ScriptedWallet {
    async fn send(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let requested_chain = params[0]["chainId"].as_str().map(str::to_owned);
        self.calls
            .lock()
            .expect("calls lock")
            .push((method.to_owned(), params));
        let script = self.script.lock().expect("script lock").clone();
        match method {
            "eth_chainId" => Ok(Value::String(script.chain_id)),
            "eth_requestAccounts" => Ok(serde_json::json!(script.accounts)),
            "wallet_switchEthereumChain" => match script.switch_error {
                Some(err) => Err(err),
                None => {
                    self.script.lock().expect("script lock").chain_id = "0x51".to_owned();
                    Ok(Value::Null)
                }
            },
            "wallet_addEthereumChain" => {
                // Wallets switch to a chain right after registering it.
                if let Some(chain) = requested_chain {
                    self.script.lock().expect("script lock").chain_id = chain;
                }
                Ok(Value::Null)
            }
            "personal_sign" => Ok(Value::String(format!("0x{}", "11".repeat(65)))),
            "eth_sendTransaction" => {
                if let Some(gate) = &self.send_gate {
                    gate.notified().await;
                }
                match script.send_error {
                    Some(err) => Err(err),
                    None => Ok(Value::String(script.tx_hash)),
                }
            }
            _ => Err(PortError::NotImplemented("scripted wallet method")),
        }
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("notices lock").clone()
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices().into_iter().map(|n| n.level).collect()
    }

    pub fn count(&self, level: NoticeLevel) -> usize {
        self.levels().into_iter().filter(|l| *l == level).count()
    }
}

impl NotifierPort for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().expect("notices lock").push(notice);
    }
}

#[derive(Debug, Default)]
pub struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> Result<u64, PortError> {
        Ok(1_739_750_400_000)
    }
}

pub type TestGateway = WalletGateway<Arc<RecordingNotifier>, FixedClock>;
pub type TestFlow = SubmissionFlow<Arc<RecordingNotifier>, FixedClock>;

pub fn owner_address() -> Address {
    "0x1000000000000000000000000000000000000001"
        .parse()
        .expect("valid owner address")
}

pub fn gateway_address() -> Address {
    GATEWAY_ADDRESS.parse().expect("valid gateway address")
}

pub fn gateway_abi() -> Arc<JsonAbi> {
    Arc::new(serde_json::from_str(GATEWAY_ABI).expect("gateway abi"))
}

pub fn new_gateway(
    wallet: Option<Arc<ScriptedWallet>>,
    notifier: Arc<RecordingNotifier>,
) -> TestGateway {
    let injected = wallet.map(|w| w as Arc<dyn WalletTransport>);
    WalletGateway::new(NetworkDescriptor::shibuya(), injected, notifier, FixedClock)
}

pub fn new_flow(wallet: Option<Arc<ScriptedWallet>>, notifier: Arc<RecordingNotifier>) -> TestFlow {
    SubmissionFlow::new(
        new_gateway(wallet, notifier),
        ContractDetails {
            abi: gateway_abi(),
            address: Some(gateway_address()),
        },
        GatewayCallConfig::default(),
    )
}
