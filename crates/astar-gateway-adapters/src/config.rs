use std::path::PathBuf;
use std::str::FromStr;

use alloy::primitives::{Address, Bytes};

use astar_gateway_core::{GatewayCallConfig, NetworkDescriptor};

pub const DEFAULT_GATEWAY_ADDRESS: &str = "0xF871c929bE8Cd8382148C69053cE5ED1a9593EA7";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeProfile {
    Development,
    Production,
}

impl FromStr for RuntimeProfile {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown runtime profile: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub runtime_profile: RuntimeProfile,
    pub eip1193_proxy_url: Option<String>,
    pub rpc_timeout_ms: u64,
    pub network: NetworkDescriptor,
    pub contract_address: Option<Address>,
    pub abi_path: Option<PathBuf>,
    pub message_code: u64,
    pub gas_budget: u64,
    pub toast_ttl_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::Production,
            eip1193_proxy_url: None,
            rpc_timeout_ms: 120_000,
            network: NetworkDescriptor::shibuya(),
            contract_address: DEFAULT_GATEWAY_ADDRESS.parse().ok(),
            abi_path: None,
            message_code: 5,
            gas_budget: 100_000,
            toast_ttl_ms: 1_000,
        }
    }
}

impl GatewayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Unparseable values are logged and the default is kept.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(profile) = parse_var(&lookup, "ASTAR_GATEWAY_RUNTIME_PROFILE") {
            cfg.runtime_profile = profile;
        }
        if let Some(url) = lookup("ASTAR_GATEWAY_EIP1193_PROXY_URL").filter(|v| !v.trim().is_empty())
        {
            cfg.eip1193_proxy_url = Some(url.trim().to_owned());
        }
        if let Some(ms) = parse_var(&lookup, "ASTAR_GATEWAY_RPC_TIMEOUT_MS") {
            cfg.rpc_timeout_ms = ms;
        }
        if let Some(address) = parse_var(&lookup, "ASTAR_GATEWAY_CONTRACT_ADDRESS") {
            cfg.contract_address = Some(address);
        }
        if let Some(path) = lookup("ASTAR_GATEWAY_ABI_PATH").filter(|v| !v.trim().is_empty()) {
            cfg.abi_path = Some(PathBuf::from(path.trim()));
        }
        if let Some(code) = parse_var(&lookup, "ASTAR_GATEWAY_MESSAGE_CODE") {
            cfg.message_code = code;
        }
        if let Some(gas) = parse_var(&lookup, "ASTAR_GATEWAY_GAS_BUDGET") {
            cfg.gas_budget = gas;
        }
        if let Some(ttl) = parse_var(&lookup, "ASTAR_GATEWAY_TOAST_TTL_MS") {
            cfg.toast_ttl_ms = ttl;
        }

        cfg
    }

    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }

    pub fn call_config(&self) -> GatewayCallConfig {
        GatewayCallConfig {
            message_code: self.message_code,
            gas_budget: self.gas_budget,
            payload: Bytes::new(),
        }
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring invalid config value");
            None
        }
    }
}
