use std::fmt;
use std::sync::Arc;

use alloy::json_abi::JsonAbi;
use alloy::primitives::{Address, Bytes, B256};
use serde_json::Value;

use crate::abi::encode_function_call;
use crate::domain::{GatewayMessage, SUBMIT_MESSAGE_METHOD};
use crate::ports::{PortError, WalletTransport};

/// Live handle to the injected wallet.
#[derive(Clone)]
pub struct Connection {
    transport: Arc<dyn WalletTransport>,
}

impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection").finish_non_exhaustive()
    }
}

impl Connection {
    pub fn new(transport: Arc<dyn WalletTransport>) -> Self {
        Self { transport }
    }

    pub async fn send(&self, method: &str, params: Value) -> Result<Value, PortError> {
        tracing::debug!(method, "wallet request");
        self.transport.send(method, params).await
    }

    pub async fn chain_id(&self) -> Result<Value, PortError> {
        self.send("eth_chainId", serde_json::json!([])).await
    }

    /// Asks the wallet for its accounts and binds a signer to the first one.
    pub async fn get_signer(&self) -> Result<Signer, PortError> {
        let result = self
            .send("eth_requestAccounts", serde_json::json!([]))
            .await?;
        let arr = result.as_array().ok_or_else(|| {
            PortError::Transport("eth_requestAccounts: array expected".to_owned())
        })?;
        let raw = arr
            .first()
            .ok_or_else(|| {
                PortError::Policy("no wallet accounts available; unlock/connect wallet".to_owned())
            })?
            .as_str()
            .ok_or_else(|| PortError::Transport("eth_requestAccounts: string expected".to_owned()))?;
        let address: Address = raw
            .parse()
            .map_err(|e| PortError::Validation(format!("invalid account address: {e}")))?;
        Ok(Signer {
            address,
            connection: self.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Signer {
    address: Address,
    connection: Connection,
}

impl Signer {
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    pub async fn personal_sign(&self, message: &str) -> Result<Bytes, PortError> {
        let result = self
            .connection
            .send(
                "personal_sign",
                serde_json::json!([message, self.address.to_string()]),
            )
            .await?;
        let raw = result
            .as_str()
            .ok_or_else(|| PortError::Transport("personal_sign must return hex string".to_owned()))?;
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid signature hex: {e}")))
    }

    pub async fn send_transaction(&self, to: Address, data: Bytes) -> Result<B256, PortError> {
        let tx = serde_json::json!({
            "from": self.address.to_string(),
            "to": to.to_string(),
            "data": data.to_string(),
        });
        let result = self
            .connection
            .send("eth_sendTransaction", serde_json::json!([tx]))
            .await?;
        let raw = result.as_str().ok_or_else(|| {
            PortError::Transport("eth_sendTransaction must return tx hash".to_owned())
        })?;
        raw.parse()
            .map_err(|e| PortError::Validation(format!("invalid tx hash: {e}")))
    }
}

#[derive(Debug, Clone)]
pub struct ContractDetails {
    pub abi: Arc<JsonAbi>,
    pub address: Option<Address>,
}

/// Signer + ABI + deployed address. Building one performs no network call.
#[derive(Debug, Clone)]
pub struct ContractBinding {
    address: Address,
    abi: Arc<JsonAbi>,
    signer: Signer,
}

impl ContractBinding {
    pub fn new(address: Address, abi: Arc<JsonAbi>, signer: Signer) -> Self {
        Self {
            address,
            abi,
            signer,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn encode_call(&self, method: &str, args: &[Value]) -> Result<Bytes, PortError> {
        encode_function_call(&self.abi, method, args)
    }

    pub async fn send(&self, method: &str, args: &[Value]) -> Result<B256, PortError> {
        let data = self.encode_call(method, args)?;
        self.signer.send_transaction(self.address, data).await
    }

    pub async fn submit_message(&self, message: &GatewayMessage) -> Result<B256, PortError> {
        self.send(SUBMIT_MESSAGE_METHOD, &message.to_call_args())
            .await
    }
}
