/**
 * egui Native Desktop App - Main Entry Point
 *
 * Loads configuration, picks the availability backend and runs the
 * VoiceMate signup window.
 */
use std::sync::Arc;

use eframe::egui;
use tracing_subscriber::EnvFilter;
use voicemate::availability::{AvailabilityBackend, InMemoryBackend};
use voicemate::egui_app::{theme, views, AppState, Config, HttpBackend};

/// PulseIDs treated as taken when running without an API
const OFFLINE_TAKEN: [&str; 4] = ["rick", "morty", "admin", "voicemate"];

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

fn build_backend(config: &Config) -> Result<Arc<dyn AvailabilityBackend>, Box<dyn std::error::Error>> {
    if config.has_remote_api() {
        tracing::info!("Using VoiceMate API at {}", config.server_url());
        Ok(Arc::new(HttpBackend::new(config.clone())?))
    } else {
        tracing::info!("No API configured, running in offline mode");
        Ok(Arc::new(InMemoryBackend::with_taken_handles(OFFLINE_TAKEN)))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_tracing();

    let config = Config::load()?;
    let backend = build_backend(&config)?;
    let state = AppState::new(config, backend)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([720.0, 640.0])
            .with_min_inner_size([520.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "VoiceMate",
        options,
        Box::new(|cc| {
            theme::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(VoiceMateApp { state }))
        }),
    )?;

    Ok(())
}

/// Main application state
struct VoiceMateApp {
    state: AppState,
}

impl eframe::App for VoiceMateApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.check_signup_result();

        views::render_top_bar(ctx, &mut self.state);

        views::render_main_panel(ctx, &mut self.state);

        ctx.request_repaint();
    }
}
