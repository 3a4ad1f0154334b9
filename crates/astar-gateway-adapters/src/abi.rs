use std::path::Path;

use alloy::json_abi::JsonAbi;

use astar_gateway_core::{PortError, SUBMIT_MESSAGE_METHOD};

const BUNDLED_GATEWAY_ABI: &str = include_str!("../abi/Gateway.json");

/// Loads the gateway ABI from `path`, or the bundled definition when none is given.
pub fn load_gateway_abi(path: Option<&Path>) -> Result<JsonAbi, PortError> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            PortError::Validation(format!("failed to read abi file {}: {e}", path.display()))
        })?,
        None => BUNDLED_GATEWAY_ABI.to_owned(),
    };
    parse_gateway_abi(&raw)
}

pub fn parse_gateway_abi(raw: &str) -> Result<JsonAbi, PortError> {
    let abi: JsonAbi = serde_json::from_str(raw)
        .map_err(|e| PortError::Validation(format!("invalid abi json: {e}")))?;
    if abi.function(SUBMIT_MESSAGE_METHOD).is_none() {
        return Err(PortError::Validation(format!(
            "abi has no {SUBMIT_MESSAGE_METHOD} function"
        )));
    }
    Ok(abi)
}
