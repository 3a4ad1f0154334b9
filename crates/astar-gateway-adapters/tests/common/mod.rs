#![allow(dead_code)]

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::thread;

use serde_json::{json, Value};
use tiny_http::{Response, Server, StatusCode};

use astar_gateway_adapters::{GatewayConfig, RuntimeProfile};

pub const TX_HASH: &str = "0xbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
pub const ACCOUNT: &str = "0x2000000000000000000000000000000000000002";

pub type Calls = Arc<Mutex<Vec<(String, Value)>>>;

/// JSON-RPC wallet bridge that answers from `respond` and records `(method, params)`.
pub fn spawn_mock_wallet<F>(respond: F) -> (String, Calls)
where
    F: Fn(&str, &Value) -> Result<Value, (i64, &'static str)> + Send + 'static,
{
    let server = Server::http("127.0.0.1:0").expect("start server");
    let addr = format!("http://{}", server.server_addr());
    let calls: Calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&calls);

    thread::spawn(move || {
        for mut req in server.incoming_requests() {
            let mut body = String::new();
            if req.as_reader().read_to_string(&mut body).is_err() {
                continue;
            }
            let request: Value = serde_json::from_str(&body).unwrap_or(Value::Null);
            let method = request["method"].as_str().unwrap_or_default().to_owned();
            let params = request["params"].clone();
            if let Ok(mut g) = recorded.lock() {
                g.push((method.clone(), params.clone()));
            }
            let payload = match respond(&method, &params) {
                Ok(result) => json!({"jsonrpc": "2.0", "id": request["id"], "result": result}),
                Err((code, message)) => json!({
                    "jsonrpc": "2.0",
                    "id": request["id"],
                    "error": {"code": code, "message": message}
                }),
            };
            let response =
                Response::from_string(payload.to_string()).with_status_code(StatusCode(200));
            let _ = req.respond(response);
        }
    });

    (addr, calls)
}

pub fn methods(calls: &Calls) -> Vec<String> {
    calls
        .lock()
        .expect("calls lock")
        .iter()
        .map(|(m, _)| m.clone())
        .collect()
}

pub fn proxy_config(base_url: String) -> GatewayConfig {
    GatewayConfig {
        runtime_profile: RuntimeProfile::Production,
        eip1193_proxy_url: Some(base_url),
        rpc_timeout_ms: 5_000,
        toast_ttl_ms: 60_000,
        ..GatewayConfig::default()
    }
}
