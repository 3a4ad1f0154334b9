use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use alloy::primitives::{keccak256, Address, Bytes};
use async_trait::async_trait;
use serde_json::Value;

use astar_gateway_core::{PortError, WalletTransport, UNRECOGNIZED_CHAIN_CODE};

use crate::GatewayConfig;

/// Wallet capability reached through EIP-1193 `send(method, params)`.
///
/// `Proxy` forwards JSON-RPC to a wallet bridge over HTTP. `Deterministic` is an in-memory
/// wallet for development and tests: it starts on mainnet, knows only mainnet, and derives
/// signatures and transaction hashes from the request payload.
#[derive(Debug, Clone)]
pub struct Eip1193Adapter {
    mode: ProviderMode,
    state: Arc<Mutex<WalletState>>,
}

#[derive(Debug, Clone)]
enum ProviderMode {
    Deterministic,
    Proxy(ProxyRuntime),
}

#[derive(Debug, Clone)]
struct ProxyRuntime {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Clone)]
struct WalletState {
    accounts: Vec<Address>,
    chain_id: u64,
    known_chains: BTreeSet<u64>,
    rejections: HashMap<String, (i64, String)>,
    requests: Vec<(String, Value)>,
    tx_count: u64,
    next_id: u64,
}

impl Default for WalletState {
    fn default() -> Self {
        Self {
            accounts: vec![Address::with_last_byte(1)],
            chain_id: 1,
            known_chains: BTreeSet::from([1]),
            rejections: HashMap::new(),
            requests: Vec::new(),
            tx_count: 0,
            next_id: 0,
        }
    }
}

impl Eip1193Adapter {
    /// Resolves the injected wallet, if any. `None` means no wallet capability is available.
    pub fn detect(config: &GatewayConfig) -> Option<Self> {
        if let Some(ref base_url) = config.eip1193_proxy_url {
            let timeout = Duration::from_millis(config.rpc_timeout_ms);
            return match reqwest::Client::builder().timeout(timeout).build() {
                Ok(client) => Some(Self::with_mode(ProviderMode::Proxy(ProxyRuntime {
                    base_url: base_url.clone(),
                    client,
                }))),
                Err(e) => {
                    tracing::error!(error = %e, "failed to initialize EIP-1193 proxy client");
                    if config.strict_runtime_required() {
                        None
                    } else {
                        Some(Self::deterministic())
                    }
                }
            };
        }
        if config.strict_runtime_required() {
            tracing::warn!("EIP-1193 proxy URL not configured; no wallet available");
            return None;
        }
        tracing::info!("development profile without EIP-1193 proxy; using deterministic wallet");
        Some(Self::deterministic())
    }

    pub fn deterministic() -> Self {
        Self::with_mode(ProviderMode::Deterministic)
    }

    fn with_mode(mode: ProviderMode) -> Self {
        Self {
            mode,
            state: Arc::new(Mutex::new(WalletState::default())),
        }
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.mode, ProviderMode::Deterministic)
    }

    fn lock_state(&self) -> Result<MutexGuard<'_, WalletState>, PortError> {
        self.state
            .lock()
            .map_err(|e| PortError::Transport(format!("provider lock poisoned: {e}")))
    }

    pub fn debug_inject_chain_changed(&self, chain_id: u64) -> Result<(), PortError> {
        let mut g = self.lock_state()?;
        g.known_chains.insert(chain_id);
        g.chain_id = chain_id;
        Ok(())
    }

    pub fn debug_set_accounts(&self, accounts: Vec<Address>) -> Result<(), PortError> {
        self.lock_state()?.accounts = accounts;
        Ok(())
    }

    /// Makes the next call to `method` fail with the given wallet error code.
    pub fn debug_reject_next(&self, method: &str, code: i64, message: &str) -> Result<(), PortError> {
        self.lock_state()?
            .rejections
            .insert(method.to_owned(), (code, message.to_owned()));
        Ok(())
    }

    pub fn debug_requests(&self) -> Result<Vec<(String, Value)>, PortError> {
        Ok(self.lock_state()?.requests.clone())
    }

    async fn proxy_call(
        &self,
        proxy: &ProxyRuntime,
        method: &str,
        params: Value,
    ) -> Result<Value, PortError> {
        let id = {
            let mut g = self.lock_state()?;
            g.next_id = g.next_id.saturating_add(1);
            g.next_id
        };
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let response = proxy
            .client
            .post(&proxy.base_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy request failed: {e}")))?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PortError::Transport(format!("eip1193 proxy json decode failed: {e}")))?;
        if let Some(err) = body.get("error") {
            return Err(rpc_error(err));
        }
        if !status.is_success() {
            return Err(PortError::Transport(format!(
                "eip1193 proxy status {status}: {body}"
            )));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| PortError::Transport("eip1193 proxy missing result".to_owned()))
    }

    fn deterministic_call(&self, method: &str, params: Value) -> Result<Value, PortError> {
        let mut g = self.lock_state()?;
        g.requests.push((method.to_owned(), params.clone()));
        if let Some((code, message)) = g.rejections.remove(method) {
            return Err(PortError::Rpc { code, message });
        }

        match method {
            "eth_chainId" => Ok(Value::String(format!("{:#x}", g.chain_id))),
            "eth_accounts" | "eth_requestAccounts" => Ok(serde_json::json!(g
                .accounts
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>())),
            "wallet_switchEthereumChain" => {
                let chain_id = first_param_chain_id(&params)?;
                if !g.known_chains.contains(&chain_id) {
                    return Err(PortError::Rpc {
                        code: UNRECOGNIZED_CHAIN_CODE,
                        message: format!("Unrecognized chain ID \"{chain_id:#x}\"."),
                    });
                }
                g.chain_id = chain_id;
                Ok(Value::Null)
            }
            "wallet_addEthereumChain" => {
                let chain_id = first_param_chain_id(&params)?;
                g.known_chains.insert(chain_id);
                g.chain_id = chain_id;
                Ok(Value::Null)
            }
            "personal_sign" => {
                let message = params
                    .get(0)
                    .and_then(Value::as_str)
                    .ok_or_else(|| PortError::Validation("personal_sign: message expected".to_owned()))?;
                let signer = params
                    .get(1)
                    .and_then(Value::as_str)
                    .ok_or_else(|| PortError::Validation("personal_sign: address expected".to_owned()))?;
                Ok(Value::String(
                    deterministic_signature(message.as_bytes(), signer).to_string(),
                ))
            }
            "eth_sendTransaction" => {
                let tx = params
                    .get(0)
                    .ok_or_else(|| PortError::Validation("eth_sendTransaction: tx expected".to_owned()))?;
                g.tx_count = g.tx_count.saturating_add(1);
                let mut seed = serde_json::to_vec(tx).map_err(|e| {
                    PortError::Validation(format!("tx payload serialization failed: {e}"))
                })?;
                seed.extend_from_slice(&g.tx_count.to_be_bytes());
                Ok(Value::String(keccak256(seed).to_string()))
            }
            _ => Err(PortError::Rpc {
                code: 4200,
                message: format!("method {method} is not supported"),
            }),
        }
    }
}

#[async_trait]
impl WalletTransport for Eip1193Adapter {
    async fn send(&self, method: &str, params: Value) -> Result<Value, PortError> {
        match &self.mode {
            ProviderMode::Proxy(proxy) => self.proxy_call(proxy, method, params).await,
            ProviderMode::Deterministic => self.deterministic_call(method, params),
        }
    }
}

fn rpc_error(err: &Value) -> PortError {
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_else(|| err.to_string());
    match err.get("code").and_then(Value::as_i64) {
        Some(code) => PortError::Rpc { code, message },
        None => PortError::Transport(format!("eip1193 proxy returned error: {message}")),
    }
}

fn deterministic_signature(payload: &[u8], signer: &str) -> Bytes {
    let mut seed = Vec::with_capacity(payload.len() + signer.len());
    seed.extend_from_slice(signer.as_bytes());
    seed.extend_from_slice(payload);
    let hash = keccak256(seed);
    let mut sig = Vec::with_capacity(65);
    sig.extend_from_slice(hash.as_slice());
    sig.extend_from_slice(hash.as_slice());
    sig.push(27);
    Bytes::from(sig)
}

fn first_param_chain_id(params: &Value) -> Result<u64, PortError> {
    let raw = params
        .get(0)
        .and_then(|p| p.get("chainId"))
        .ok_or_else(|| PortError::Validation("chainId parameter expected".to_owned()))?;
    json_chain_id_to_u64(raw)
}

fn json_chain_id_to_u64(value: &Value) -> Result<u64, PortError> {
    if let Some(n) = value.as_u64() {
        return Ok(n);
    }
    let s = value
        .as_str()
        .ok_or_else(|| PortError::Validation("chain id must be string or number".to_owned()))?;
    parse_chain_id_str(s)
}

fn parse_chain_id_str(raw: &str) -> Result<u64, PortError> {
    if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
            .map_err(|e| PortError::Validation(format!("invalid hex chain id: {e}")))
    } else {
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid chain id: {e}")))
    }
}
