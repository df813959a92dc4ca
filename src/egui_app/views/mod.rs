use eframe::egui;

use crate::egui_app::AppView;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod signup_view;
pub mod welcome_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.colored_label(colors::TEXT_LIGHT, egui::RichText::new("🎙 VoiceMate").size(18.0).strong());

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(16.0);

                    if state.config.has_remote_api() {
                        ui.colored_label(colors::STATUS_ONLINE, "🟢 Online");
                    } else {
                        ui.colored_label(colors::STATUS_OFFLINE, "⚪ Offline mode");
                    }

                    ui.add_space(16.0);

                    if let Some(ref account) = state.auth_state.account {
                        ui.colored_label(colors::TEXT_LIGHT, format!("@{}", account.pulse_id));
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let frame = egui::Frame::default()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(0));

    egui::CentralPanel::default()
        .frame(frame)
        .show(ctx, |ui| match state.current_view {
            AppView::Signup => signup_view::render(ui, state),
            AppView::Welcome => welcome_view::render(ui, state),
        });
}
