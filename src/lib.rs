//! VoiceMate - Main Library
//!
//! VoiceMate users are found by their PulseID, a unique public handle chosen
//! at signup. This library implements the live availability check behind the
//! PulseID field and the final guard that runs before an account is created.
//!
//! # Overview
//!
//! - Debounced availability checks while the user types
//! - A short-TTL cache shared across checks
//! - Stale-response protection for out-of-order backend answers
//! - Alternative PulseID suggestions for taken handles
//! - A concurrent handle + email re-check right before commit
//! - Native desktop signup app via egui
//!
//! # Module Structure
//!
//! - **`shared`** - Candidate normalization and validation, error types, configuration
//!
//! - **`availability`** - The availability workflow
//!   - Cache, debounce timer, checker, reservation guard
//!   - Backend collaborator trait and an in-memory backend
//!   - Suggestion generator and workflow metrics
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Signup and welcome views
//!   - HTTP backend for the VoiceMate API
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voicemate::availability::{AvailabilityCache, AvailabilityChecker, InMemoryBackend};
//! use voicemate::shared::AvailabilitySettings;
//!
//! # async fn example() {
//! let settings = AvailabilitySettings::default();
//! let cache = Arc::new(AvailabilityCache::with_ttl(settings.cache_ttl()));
//! let checker = AvailabilityChecker::new(Arc::new(InMemoryBackend::new()), cache, settings);
//! checker.on_input("rick", true);
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - **Checker**: field state sits behind a `Mutex`, snapshots are published on a `watch` channel
//! - **Cache**: `Arc<RwLock<>>`, safe to share between any number of checkers
//! - **Native**: egui is single-threaded immediate mode GUI; async work runs on an owned Tokio runtime
//!
//! # Error Handling
//!
//! - `ValidationError` for local input problems
//! - `BackendError` for failed backend calls
//! - `ReservationError` for every way a submit can be rejected

/// Shared types and data structures
pub mod shared;

/// Live PulseID availability checking
pub mod availability;

/// egui native desktop app
/// Only compiled for native targets (not WASM)
#[cfg(not(target_arch = "wasm32"))]
pub mod egui_app;
