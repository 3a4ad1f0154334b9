use std::str::FromStr;

use alloy::dyn_abi::{DynSolType, DynSolValue, JsonAbiExt};
use alloy::json_abi::{Function, JsonAbi};
use alloy::primitives::{Bytes, U256};
use serde_json::Value;

use crate::ports::PortError;

/// Encodes calldata for `method` using the input types declared in `abi`.
pub fn encode_function_call(
    abi: &JsonAbi,
    method: &str,
    args: &[Value],
) -> Result<Bytes, PortError> {
    let function = select_function(abi, method, args.len())?;

    let mut values = Vec::with_capacity(args.len());
    for (input, arg) in function.inputs.iter().zip(args.iter()) {
        let ty: DynSolType = input.ty.parse().map_err(|e| {
            PortError::Validation(format!("unsupported type '{}': {e}", input.ty))
        })?;
        let value = coerce_value(arg, &ty).map_err(|e| {
            PortError::Validation(format!("arg '{}' parse failed: {e}", input.name))
        })?;
        values.push(value);
    }

    function
        .abi_encode_input(&values)
        .map(Bytes::from)
        .map_err(|e| PortError::Validation(format!("abi encoding failed: {e}")))
}

fn select_function<'a>(
    abi: &'a JsonAbi,
    method: &str,
    arity: usize,
) -> Result<&'a Function, PortError> {
    let candidates = abi
        .function(method)
        .ok_or_else(|| PortError::Validation(format!("method not found: {method}")))?;
    candidates
        .iter()
        .find(|f| f.inputs.len() == arity)
        .ok_or_else(|| {
            PortError::Validation(format!(
                "argument count mismatch for {method}: no overload takes {arity}"
            ))
        })
}

/// `submitMessage` only takes strings, unsigned integers and bytes.
fn coerce_value(value: &Value, ty: &DynSolType) -> Result<DynSolValue, String> {
    match ty {
        DynSolType::Uint(bits) => {
            let raw = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return Err("expected uint string/number".to_owned()),
            };
            U256::from_str(&raw)
                .map(|x| DynSolValue::Uint(x, *bits))
                .map_err(|e| format!("invalid uint: {e}"))
        }
        DynSolType::Bytes => value
            .as_str()
            .ok_or_else(|| "expected bytes string".to_owned())
            .and_then(|s| {
                Bytes::from_str(s)
                    .map(|x| DynSolValue::Bytes(x.into()))
                    .map_err(|e| format!("invalid bytes: {e}"))
            }),
        DynSolType::String => value
            .as_str()
            .map(|s| DynSolValue::String(s.to_owned()))
            .ok_or_else(|| "expected string".to_owned()),
        _ => Err(format!("type {ty:?} not supported for gateway calls")),
    }
}
