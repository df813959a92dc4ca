//! egui Native Desktop App Module
//!
//! A native desktop signup client built with egui/eframe. It drives the
//! live PulseID availability check and talks to the VoiceMate API, or to an
//! in-memory backend when no API is configured.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs      - Module exports and documentation
//! ├── main.rs     - Main application entry point
//! ├── config.rs   - Configuration and session token
//! ├── api.rs      - HTTP availability backend
//! ├── auth.rs     - Signup state and background submit
//! ├── types.rs    - App views and API wire types
//! ├── state/      - Central app state
//! ├── views/      - Signup and welcome screens
//! └── theme/      - Colors and styles
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! // Run the desktop app:
//! // cargo run --bin voicemate
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod state;
pub mod theme;
pub mod types;
pub mod views;

// Re-export commonly used types
pub use api::HttpBackend;
pub use auth::{signup, AuthState, SignupResult};
pub use config::Config;
pub use state::AppState;
pub use types::{AppView, UserInfo};
