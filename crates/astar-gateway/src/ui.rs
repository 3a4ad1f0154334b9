//! UI helper components

use eframe::egui;
use web_time::Instant;

use astar_gateway_adapters::ToastQueue;
use astar_gateway_core::NoticeLevel;

/// Open URL in the system browser
pub fn open_url(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!(%url, error = %e, "failed to open url");
    }
}

pub fn copy_to_clipboard(text: &str) -> bool {
    match arboard::Clipboard::new().and_then(|mut c| c.set_text(text.to_owned())) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "clipboard unavailable");
            false
        }
    }
}

fn toast_colors(level: NoticeLevel) -> (egui::Color32, egui::Color32) {
    let fill = match level {
        NoticeLevel::Info => egui::Color32::from_rgb(52, 152, 219),
        NoticeLevel::Success => egui::Color32::from_rgb(7, 188, 12),
        NoticeLevel::Warning => egui::Color32::from_rgb(241, 196, 15),
        NoticeLevel::Error => egui::Color32::from_rgb(231, 76, 60),
    };
    (fill, egui::Color32::WHITE)
}

/// Stacked toasts in the bottom-right corner. Clicking one dismisses it.
pub fn toast_stack(ctx: &egui::Context, toasts: &ToastQueue) {
    let visible = toasts.visible(Instant::now());
    if visible.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("toast_stack"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for toast in &visible {
                let (fill, text) = toast_colors(toast.notice.level);
                let response = egui::Frame::none()
                    .fill(fill)
                    .rounding(6.0)
                    .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&toast.notice.message).color(text));
                    })
                    .response
                    .interact(egui::Sense::click());
                if response.clicked() {
                    toasts.dismiss(toast.id);
                }
                ui.add_space(6.0);
            }
        });

    // Wake up again to auto-dismiss.
    ctx.request_repaint_after(toasts.ttl() / 4);
}
