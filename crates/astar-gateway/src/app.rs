//! Main application state and update loop

use eframe::egui;

use astar_gateway_core::{FormInput, SessionStatus, SessionView};

use crate::bridge::GatewayBridge;
use crate::ui;

const SUPPORT_ADDRESS: &str = "0x24B00B5987Ae6A5b7a8c73671332b938433fA7D9";

pub struct App {
    bridge: GatewayBridge,
    /// Raw value of the `contract` form field
    contract_input: String,
    /// Set briefly after the hash was copied
    copied: bool,
}

impl App {
    pub fn new(bridge: GatewayBridge) -> Self {
        Self {
            bridge,
            contract_input: String::new(),
            copied: false,
        }
    }

    fn connect_section(&mut self, ui: &mut egui::Ui, view: &SessionView) {
        let can_connect = view.address.is_none() && view.status != SessionStatus::Connecting;
        if ui
            .add_enabled(can_connect, egui::Button::new("Connect Wallet"))
            .clicked()
        {
            self.bridge.connect(ui.ctx());
        }
        if let Some(address) = view.address {
            ui.heading(format!("Connected Address: {address}"));
        }
    }

    fn submit_form(&mut self, ui: &mut egui::Ui, view: &SessionView) {
        ui.label(format!(
            "Your deployed contract (on {})",
            self.bridge.network().chain_name
        ));
        let field = ui.add(
            egui::TextEdit::singleline(&mut self.contract_input)
                .id(egui::Id::new("contract"))
                .desired_width(f32::INFINITY)
                .hint_text("0x..."),
        );
        let submitted_with_enter =
            field.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        let clicked = if view.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Mining transaction...");
            });
            false
        } else {
            ui.add_enabled(view.has_contract, egui::Button::new("Submit"))
                .clicked()
        };

        if (clicked || submitted_with_enter)
            && view.has_contract
            && view.status == SessionStatus::Connected
        {
            self.copied = false;
            self.bridge
                .submit(FormInput::new(self.contract_input.clone()), ui.ctx());
        }
    }

    fn hash_section(&mut self, ui: &mut egui::Ui, view: &SessionView) {
        let Some(hash) = view.hash else {
            return;
        };
        let hash = hash.to_string();
        ui.heading(format!("Transaction hash: {hash}"));
        ui.horizontal(|ui| {
            if ui.button("📋 Copy").clicked() {
                self.copied = ui::copy_to_clipboard(&hash);
            }
            if self.copied {
                ui.label("Copied");
            }
            if let Some(url) = self.bridge.network().explorer_tx_url(&hash) {
                if ui.link("View on explorer").clicked() {
                    ui::open_url(&url);
                }
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.bridge.view();

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Support my work: {SUPPORT_ADDRESS}."));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(format!(
                        "{} @ {}",
                        env!("GIT_HASH"),
                        env!("BUILD_TIME")
                    ));
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading(egui::RichText::new("ASTAR GATEWAY APP").size(36.0).strong());
                ui.add_space(12.0);
                self.connect_section(ui, &view);
                ui.add_space(12.0);
                self.submit_form(ui, &view);
                ui.add_space(12.0);
                self.hash_section(ui, &view);
            });
        });

        ui::toast_stack(ctx, self.bridge.toasts());

        if matches!(
            view.status,
            SessionStatus::Connecting | SessionStatus::Submitting
        ) {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
