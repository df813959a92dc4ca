//! # Live PulseID Availability
//!
//! Debounced, cache-aware uniqueness checking for the PulseID field, plus the
//! final re-validation that runs right before an account is created.
//!
//! ## Architecture
//!
//! - `cache.rs`: short-TTL availability cache shared across fields
//! - `clock.rs`: injectable time source for the cache
//! - `timer.rs`: cancellable debounce timer
//! - `checker.rs`: debounced checker and stale-response guard
//! - `guard.rs`: final reservation guard (`submit`)
//! - `suggest.rs`: alternative PulseIDs for taken candidates
//! - `backend.rs`: backend collaborator trait and in-memory backend
//! - `metrics.rs`: workflow counters
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use voicemate::availability::{AvailabilityCache, AvailabilityChecker, InMemoryBackend, ReservationForm};
//! use voicemate::shared::AvailabilitySettings;
//!
//! # async fn example() {
//! let settings = AvailabilitySettings::default();
//! let cache = Arc::new(AvailabilityCache::with_ttl(settings.cache_ttl()));
//! let checker = AvailabilityChecker::new(Arc::new(InMemoryBackend::new()), cache, settings);
//!
//! // Feed every edit of the field
//! checker.on_input("rick", true);
//!
//! // Render from the latest snapshot
//! let status = checker.snapshot().status;
//!
//! // On submit
//! let result = checker
//!     .submit(ReservationForm {
//!         email: "rick@example.com".into(),
//!         password: "wubbalubba".into(),
//!         display_name: "Rick".into(),
//!     })
//!     .await;
//! # }
//! ```

pub mod backend;
pub mod cache;
pub mod checker;
pub mod clock;
pub mod guard;
pub mod metrics;
pub mod suggest;
pub mod timer;

pub use backend::{
    AccountInfo, AvailabilityBackend, CommitResponse, ConflictField, InMemoryBackend,
    ReservationRequest,
};
pub use cache::{AvailabilityCache, CacheEntry};
pub use checker::{
    AvailabilityChecker, AvailabilityStatus, CheckRequest, CheckSnapshot, ReservationPhase,
};
pub use clock::{Clock, ManualClock, TokioClock};
pub use guard::{ReservationForm, ReservationReceipt};
pub use metrics::{CheckMetrics, MetricsSnapshot};
pub use suggest::SuggestionGenerator;
pub use timer::DebounceTimer;
