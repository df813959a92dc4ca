//! Theme Module
//!
//! Color scheme and styling for the VoiceMate desktop client:
//!
//! - Color constants for the indigo/teal palette
//! - Frame and button builders shared by the views
//!
//! # Usage
//!
//! ```rust,ignore
//! use voicemate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_LIGHT, "Claim your PulseID");
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
