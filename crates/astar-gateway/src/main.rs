//! Astar Gateway: connect a wallet and relay a message through the Shibuya gateway contract.

use eframe::egui;

use astar_gateway_adapters::GatewayConfig;

mod app;
mod bridge;
mod ui;

fn main() -> eyre::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Astar Gateway");

    let config = GatewayConfig::from_env();
    let bridge = bridge::GatewayBridge::new(&config)?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Astar Gateway")
            .with_inner_size([720.0, 520.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Astar Gateway",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app::App::new(bridge)))),
    )
    .map_err(|e| eyre::eyre!("ui terminated: {e}"))
}
