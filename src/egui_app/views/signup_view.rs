use eframe::egui;

use crate::availability::{AvailabilityStatus, CheckSnapshot, ReservationPhase};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

const LABEL_WIDTH: f32 = 100.0;
const INPUT_WIDTH: f32 = 260.0;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let snapshot = state.availability();
    let busy = state.auth_state.loading || snapshot.phase == ReservationPhase::Reserving;

    ui.vertical_centered(|ui| {
        ui.add_space((ui.available_height() - 460.0).max(0.0) / 2.0);

        styles::card_frame().show(ui, |ui| {
            ui.set_max_width(LABEL_WIDTH + INPUT_WIDTH + 60.0);

            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("Claim your PulseID").size(24.0).strong().color(colors::TEXT_LIGHT));
                ui.label(egui::RichText::new("This is how friends find you on VoiceMate").color(colors::TEXT_SECONDARY));
            });
            ui.add_space(16.0);

            if let Some(ref error) = state.auth_state.error {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                if state.auth_state.sign_in_hint {
                    ui.label(egui::RichText::new("Already have an account? Sign in instead.").color(colors::TEXT_SECONDARY));
                }
                ui.add_space(8.0);
            }

            // The handle is frozen until the reservation resolves
            ui.add_enabled_ui(!busy, |ui| {
                render_pulse_id_row(ui, state, &snapshot);
                render_suggestions(ui, state, &snapshot);
            });
            ui.add_space(8.0);

            text_row(ui, "Email:", &mut state.email_input, false);
            text_row(ui, "Display name:", &mut state.display_name_input, false);
            text_row(ui, "Password:", &mut state.password_input, true);
            text_row(ui, "Confirm:", &mut state.confirm_password_input, true);

            ui.add_space(16.0);

            ui.vertical_centered(|ui| {
                let can_submit = !busy && !matches!(snapshot.status, AvailabilityStatus::Taken | AvailabilityStatus::Invalid(_));

                if ui
                    .add_enabled(can_submit, styles::primary_button("Create account"))
                    .clicked()
                {
                    state.handle_signup();
                }

                if busy {
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Reserving your PulseID...").color(colors::TEXT_LIGHT));
                        ui.spinner();
                    });
                }
            });
        });
    });
}

fn render_pulse_id_row(ui: &mut egui::Ui, state: &mut AppState, snapshot: &CheckSnapshot) {
    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, 24.0], egui::Label::new(
            egui::RichText::new("PulseID:").color(colors::TEXT_SECONDARY)
        ));

        let response = ui.add_sized([INPUT_WIDTH - 60.0, 28.0], egui::TextEdit::singleline(&mut state.pulse_id_input)
            .hint_text("yourname")
            .text_color(colors::TEXT_LIGHT));
        if response.changed() {
            state.on_pulse_id_changed();
        }

        render_status_icon(ui, &snapshot.status);

        if ui.small_button("⟳").on_hover_text("Check again").clicked() {
            state.refresh_availability();
        }
    });

    if let Some((text, color)) = status_message(&snapshot.status, &snapshot.candidate) {
        ui.horizontal(|ui| {
            ui.add_space(LABEL_WIDTH + 8.0);
            ui.label(egui::RichText::new(text).small().color(color));
        });
    }
}

fn render_status_icon(ui: &mut egui::Ui, status: &AvailabilityStatus) {
    match status {
        AvailabilityStatus::Checking => {
            ui.spinner();
        }
        AvailabilityStatus::Available => {
            ui.colored_label(colors::SUCCESS, "✓");
        }
        AvailabilityStatus::Taken | AvailabilityStatus::Invalid(_) => {
            ui.colored_label(colors::ERROR, "✗");
        }
        AvailabilityStatus::Error(_) => {
            ui.colored_label(colors::WARNING, "⚠");
        }
        AvailabilityStatus::Unknown => {}
    }
}

fn status_message(status: &AvailabilityStatus, candidate: &str) -> Option<(String, egui::Color32)> {
    match status {
        AvailabilityStatus::Unknown | AvailabilityStatus::Checking => None,
        AvailabilityStatus::Available => Some((format!("@{} is available", candidate), colors::SUCCESS)),
        AvailabilityStatus::Taken => Some((format!("@{} is already taken", candidate), colors::ERROR)),
        AvailabilityStatus::Invalid(error) => Some((error.to_string(), colors::ERROR)),
        AvailabilityStatus::Error(_) => Some(("Couldn't check availability. Try again.".to_string(), colors::WARNING)),
    }
}

fn render_suggestions(ui: &mut egui::Ui, state: &mut AppState, snapshot: &CheckSnapshot) {
    if snapshot.status != AvailabilityStatus::Taken || snapshot.suggestions.is_empty() {
        return;
    }

    let mut picked = None;
    ui.horizontal_wrapped(|ui| {
        ui.add_space(LABEL_WIDTH + 8.0);
        ui.label(egui::RichText::new("Try:").small().color(colors::TEXT_SECONDARY));
        for suggestion in &snapshot.suggestions {
            if ui.add(styles::suggestion_chip(suggestion)).clicked() {
                picked = Some(suggestion.clone());
            }
        }
    });

    if let Some(suggestion) = picked {
        state.pick_suggestion(&suggestion);
    }
}

fn text_row(ui: &mut egui::Ui, label: &str, value: &mut String, password: bool) {
    ui.horizontal(|ui| {
        ui.add_sized([LABEL_WIDTH, 24.0], egui::Label::new(
            egui::RichText::new(label).color(colors::TEXT_SECONDARY)
        ));
        ui.add_sized([INPUT_WIDTH, 28.0], egui::TextEdit::singleline(value)
            .password(password)
            .text_color(colors::TEXT_LIGHT));
    });
    ui.add_space(6.0);
}
