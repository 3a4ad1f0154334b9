pub mod abi;
pub mod clock;
pub mod config;
pub mod eip1193;
pub mod notifier;

use std::sync::Arc;
use std::time::Duration;

use astar_gateway_core::{ContractDetails, PortError, SubmissionFlow, WalletGateway, WalletTransport};

pub use abi::{load_gateway_abi, parse_gateway_abi};
pub use clock::SystemClockAdapter;
pub use config::{GatewayConfig, RuntimeProfile};
pub use eip1193::Eip1193Adapter;
pub use notifier::{Toast, ToastQueue};

pub type GatewayFlow = SubmissionFlow<ToastQueue, SystemClockAdapter>;

/// Wires the production adapters into a submission flow. The returned queue is shared with
/// the flow so the UI can render what the flow reports.
pub fn build_flow(config: &GatewayConfig) -> Result<(GatewayFlow, ToastQueue), PortError> {
    let toasts = ToastQueue::new(Duration::from_millis(config.toast_ttl_ms));
    let injected = Eip1193Adapter::detect(config).map(|w| Arc::new(w) as Arc<dyn WalletTransport>);
    build_flow_with(config, injected, toasts)
}

pub fn build_flow_with(
    config: &GatewayConfig,
    injected: Option<Arc<dyn WalletTransport>>,
    toasts: ToastQueue,
) -> Result<(GatewayFlow, ToastQueue), PortError> {
    let abi = load_gateway_abi(config.abi_path.as_deref())?;
    let gateway = WalletGateway::new(
        config.network.clone(),
        injected,
        toasts.clone(),
        SystemClockAdapter,
    );
    let flow = SubmissionFlow::new(
        gateway,
        ContractDetails {
            abi: Arc::new(abi),
            address: config.contract_address,
        },
        config.call_config(),
    );
    Ok((flow, toasts))
}
