//! Color Constants for the VoiceMate Theme
//!
//! Deep indigo surfaces with a teal accent. Status colors follow the usual
//! green / red / amber convention so the PulseID indicator reads at a glance.

use eframe::egui::Color32;

/// Window background
pub const BG_DARK: Color32 = Color32::from_rgb(0x1B, 0x1A, 0x2E);

/// Top bar background
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x24, 0x22, 0x3D);

/// Signup card background
pub const CARD_BG: Color32 = Color32::from_rgb(0x2C, 0x2A, 0x4A);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x45, 0x42, 0x6E);

/// Text input background
pub const INPUT_BG: Color32 = Color32::from_rgb(0x38, 0x35, 0x5C);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEE, 0xEC, 0xF8);

/// Labels and hints
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x9C, 0x98, 0xC0);

/// Primary buttons and highlights
pub const ACCENT: Color32 = Color32::from_rgb(0x1F, 0x9E, 0x8F);

/// Primary button hover
pub const ACCENT_HOVER: Color32 = Color32::from_rgb(0x27, 0xB8, 0xA6);

/// Suggestion chips
pub const CHIP_BG: Color32 = Color32::from_rgb(0x3F, 0x3B, 0x6A);

/// Available / success
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Taken / error
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Check failed / warning
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xA7, 0x26);

/// Online status indicator
pub const STATUS_ONLINE: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Offline status indicator
pub const STATUS_OFFLINE: Color32 = Color32::from_rgb(0x9E, 0x9E, 0x9E);
