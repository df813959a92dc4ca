use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() / 4.0);

        styles::card_frame().show(ui, |ui| {
            ui.set_max_width(360.0);
            ui.vertical_centered(|ui| {
                let (name, pulse_id) = match state.auth_state.account {
                    Some(ref account) => (account.display_name.clone(), account.pulse_id.clone()),
                    None => (String::new(), state.pulse_id_input.clone()),
                };

                ui.label(egui::RichText::new("🎉").size(40.0));
                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(format!("Welcome, {}!", name))
                        .size(24.0)
                        .strong()
                        .color(colors::TEXT_LIGHT),
                );
                ui.add_space(6.0);
                ui.label(
                    egui::RichText::new(format!("Your PulseID is @{}", pulse_id))
                        .size(16.0)
                        .color(colors::SUCCESS),
                );
                ui.add_space(20.0);

                if ui.add_sized([200.0, 32.0], styles::primary_button("Create another account")).clicked() {
                    state.start_over();
                }
            });
        });
    });
}
