//! Bridge between the egui shell and the gateway crates.
//! Owns the async runtime; the UI thread only ever reads snapshots.

use std::sync::Arc;

use eframe::egui;
use eyre::WrapErr;

use astar_gateway_adapters::{build_flow, GatewayConfig, GatewayFlow, ToastQueue};
use astar_gateway_core::{
    ConnectOutcome, FormInput, NetworkDescriptor, Notice, NotifierPort, SessionView,
    SubmitOutcome,
};

pub struct GatewayBridge {
    runtime: tokio::runtime::Runtime,
    flow: Arc<GatewayFlow>,
    toasts: ToastQueue,
    network: NetworkDescriptor,
}

impl GatewayBridge {
    pub fn new(config: &GatewayConfig) -> eyre::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .wrap_err("failed to start async runtime")?;
        let (flow, toasts) = build_flow(config).wrap_err("failed to build gateway flow")?;
        Ok(Self {
            runtime,
            flow: Arc::new(flow),
            toasts,
            network: config.network.clone(),
        })
    }

    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn view(&self) -> SessionView {
        self.flow.view().unwrap_or_else(|e| {
            tracing::error!(error = %e, "session snapshot unavailable");
            SessionView::default()
        })
    }

    pub fn connect(&self, ctx: &egui::Context) {
        let flow = Arc::clone(&self.flow);
        let toasts = self.toasts.clone();
        let ctx = ctx.clone();
        self.runtime.spawn(async move {
            match flow.connect().await {
                Ok(ConnectOutcome::Connected(address)) => {
                    tracing::info!(%address, "connect finished");
                }
                Ok(other) => tracing::debug!(outcome = ?other, "connect finished"),
                Err(e) => toasts.notify(Notice::error(e.to_string())),
            }
            ctx.request_repaint();
        });
    }

    pub fn submit(&self, form: FormInput, ctx: &egui::Context) {
        let flow = Arc::clone(&self.flow);
        let toasts = self.toasts.clone();
        let ctx = ctx.clone();
        // Repaint while the busy spinner is showing.
        ctx.request_repaint();
        self.runtime.spawn(async move {
            match flow.submit(form).await {
                Ok(SubmitOutcome::Submitted(hash)) => tracing::info!(%hash, "submit finished"),
                Ok(SubmitOutcome::Rejected(reason)) => {
                    tracing::debug!(%reason, "submit rejected");
                }
                Err(e) => toasts.notify(Notice::error(e.to_string())),
            }
            ctx.request_repaint();
        });
    }
}
