use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::domain::Notice;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortError {
    #[error("port not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("policy error: {0}")]
    Policy(String),
    #[error("wallet rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
}

impl PortError {
    /// EIP-1193 error code, when the wallet answered with a structured error.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// The injected wallet capability: a generic `send(method, params)` JSON-RPC surface.
#[async_trait]
pub trait WalletTransport: Send + Sync {
    async fn send(&self, method: &str, params: Value) -> Result<Value, PortError>;
}

pub trait NotifierPort: Send + Sync {
    fn notify(&self, notice: Notice);
}

pub trait ClockPort: Send + Sync {
    fn now_ms(&self) -> Result<u64, PortError>;
}

impl<T: NotifierPort + ?Sized> NotifierPort for std::sync::Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}

impl<T: ClockPort + ?Sized> ClockPort for std::sync::Arc<T> {
    fn now_ms(&self) -> Result<u64, PortError> {
        (**self).now_ms()
    }
}
