//! # Debounced Availability Checker
//!
//! Turns a burst of keystrokes in the PulseID field into at most one backend
//! query per pause in typing, and makes sure a slow answer for an old value
//! never overwrites the state of the value the user is looking at now.
//!
//! ## Flow
//!
//! ```text
//! on_input ─▶ cancel timer ─▶ too short / untouched? ─▶ Unknown
//!                          └▶ schedule(debounce) ─▶ cache hit? ─▶ apply
//!                                                └▶ query backend ─▶ apply if still live
//! ```
//!
//! Every dispatched query is tagged with the exact candidate it was issued
//! for and the field's generation at dispatch time. In-flight network calls
//! are never cancelled; when they resolve, results whose candidate no longer
//! matches, or whose generation was superseded by a reservation, are dropped.
//! Results are only applied while the field is in `Editing`.
//!
//! Spawned tasks only hold weak references to the field, so dropping every
//! [`AvailabilityChecker`] handle tears the field down and clears its timer.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

use crate::availability::backend::AvailabilityBackend;
use crate::availability::cache::AvailabilityCache;
use crate::availability::metrics::{CheckMetrics, MetricsSnapshot};
use crate::availability::suggest::SuggestionGenerator;
use crate::availability::timer::DebounceTimer;
use crate::shared::candidate::{normalize_candidate, Candidate};
use crate::shared::config::AvailabilitySettings;
use crate::shared::error::{BackendError, ValidationError};

/// What the UI should show next to the PulseID field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AvailabilityStatus {
    /// Not checked yet, untouched, or shorter than the minimum length
    #[default]
    Unknown,
    /// Fails local validation; never sent to the backend
    Invalid(ValidationError),
    /// Waiting for the debounce interval or a backend answer
    Checking,
    Available,
    Taken,
    /// The check itself failed; says nothing about availability
    Error(String),
}

impl AvailabilityStatus {
    /// Whether this is a definite answer from the backend or cache
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Available | Self::Taken)
    }
}

/// Where the field is in the reservation lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationPhase {
    #[default]
    Editing,
    Reserving,
    Committed,
}

/// Everything the UI renders for one PulseID field
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckSnapshot {
    /// Normalized live candidate
    pub candidate: String,
    pub status: AvailabilityStatus,
    pub suggestions: Vec<String>,
    pub consecutive_errors: u32,
    pub phase: ReservationPhase,
}

/// One dispatched availability check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRequest {
    pub id: Uuid,
    /// The candidate this request was issued for
    pub candidate: String,
    pub bypass_cache: bool,
    /// Field generation when the request was issued
    pub generation: u64,
}

impl CheckRequest {
    fn new(candidate: String, bypass_cache: bool, generation: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            candidate,
            bypass_cache,
            generation,
        }
    }
}

/// How a check was answered
#[derive(Debug)]
pub(super) enum Resolution {
    Cached { available: bool },
    Queried(Result<bool, BackendError>),
}

#[derive(Debug, Default)]
pub(super) struct FieldState {
    pub(super) live: String,
    pub(super) touched: bool,
    pub(super) status: AvailabilityStatus,
    pub(super) suggestions: Vec<String>,
    pub(super) consecutive_errors: u32,
    pub(super) force_bypass: bool,
    pub(super) phase: ReservationPhase,
    /// Bumped on entering and leaving `Reserving`
    pub(super) generation: u64,
    pub(super) closed: bool,
    pub(super) timer: DebounceTimer,
}

impl FieldState {
    fn snapshot(&self) -> CheckSnapshot {
        CheckSnapshot {
            candidate: self.live.clone(),
            status: self.status.clone(),
            suggestions: self.suggestions.clone(),
            consecutive_errors: self.consecutive_errors,
            phase: self.phase,
        }
    }
}

pub(super) struct Shared {
    pub(super) backend: Arc<dyn AvailabilityBackend>,
    pub(super) cache: Arc<AvailabilityCache>,
    pub(super) settings: AvailabilitySettings,
    pub(super) suggester: SuggestionGenerator,
    pub(super) metrics: Arc<CheckMetrics>,
    state: Mutex<FieldState>,
    updates: watch::Sender<CheckSnapshot>,
}

impl Shared {
    pub(super) fn lock_state(&self) -> MutexGuard<'_, FieldState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(super) fn publish(&self, state: &FieldState) {
        self.updates.send_replace(state.snapshot());
    }

    pub(super) fn suggestions_for(&self, candidate: &str) -> Vec<String> {
        self.suggester
            .generate(candidate, self.settings.suggestion_count, &self.settings.rules())
    }

    /// Whether a reservation started after `request` was issued
    fn is_superseded(&self, request: &CheckRequest) -> bool {
        self.lock_state().generation != request.generation
    }

    /// Apply a resolved check. Returns true when the cache must be flushed.
    fn apply(&self, request: &CheckRequest, resolution: Resolution) -> bool {
        let mut state = self.lock_state();

        if state.closed
            || !state.touched
            || state.phase != ReservationPhase::Editing
            || state.generation != request.generation
            || state.live != request.candidate
        {
            self.metrics.record_stale_response();
            tracing::debug!(
                request_id = %request.id,
                "Dropping stale availability result for '{}' (live: '{}')",
                request.candidate,
                state.live
            );
            return false;
        }

        let mut flush_cache = false;
        let taken = match resolution {
            Resolution::Cached { available } => Some(!available),
            Resolution::Queried(Ok(taken)) => {
                state.consecutive_errors = 0;
                state.force_bypass = false;
                Some(taken)
            }
            Resolution::Queried(Err(error)) => {
                self.metrics.record_query_failure();
                state.consecutive_errors += 1;
                tracing::warn!(
                    request_id = %request.id,
                    "Availability check for '{}' failed ({} in a row): {}",
                    request.candidate,
                    state.consecutive_errors,
                    error
                );
                state.status = AvailabilityStatus::Error(error.to_string());
                state.suggestions.clear();

                if state.consecutive_errors >= self.settings.error_threshold {
                    state.force_bypass = true;
                    flush_cache = true;
                }
                None
            }
        };

        match taken {
            Some(true) => {
                state.status = AvailabilityStatus::Taken;
                state.suggestions = self.suggestions_for(&request.candidate);
            }
            Some(false) => {
                state.status = AvailabilityStatus::Available;
                state.suggestions.clear();
            }
            None => {}
        }

        self.publish(&state);
        flush_cache
    }
}

/// Everything a spawned check needs without keeping the field alive
#[derive(Clone)]
struct TaskContext {
    field: Weak<Shared>,
    backend: Arc<dyn AvailabilityBackend>,
    cache: Arc<AvailabilityCache>,
    metrics: Arc<CheckMetrics>,
}

impl TaskContext {
    fn new(shared: &Arc<Shared>) -> Self {
        Self {
            field: Arc::downgrade(shared),
            backend: shared.backend.clone(),
            cache: shared.cache.clone(),
            metrics: shared.metrics.clone(),
        }
    }

    async fn run(self, request: CheckRequest) {
        if !request.bypass_cache {
            if let Some(entry) = self.cache.get(&request.candidate).await {
                self.metrics.record_cache_hit();
                tracing::debug!(
                    request_id = %request.id,
                    "Serving '{}' from cache (checked at {})",
                    request.candidate,
                    entry.checked_at_utc
                );
                if let Some(field) = self.field.upgrade() {
                    field.apply(
                        &request,
                        Resolution::Cached {
                            available: entry.available,
                        },
                    );
                }
                return;
            }
        }

        self.metrics.record_query();
        tracing::debug!(
            request_id = %request.id,
            bypass_cache = request.bypass_cache,
            "Querying availability of '{}'",
            request.candidate
        );
        let result = self.backend.query_handle_taken(&request.candidate).await;
        let field = self.field.upgrade();

        // A reservation's fresher answer already sits in the cache
        let superseded = field.as_ref().is_some_and(|f| f.is_superseded(&request));
        if let Ok(taken) = &result {
            if !superseded {
                self.cache.put(&request.candidate, !taken).await;
            }
        }

        let Some(field) = field else {
            return;
        };
        if field.apply(&request, Resolution::Queried(result)) {
            tracing::warn!("Repeated availability failures, flushing cache");
            self.cache.invalidate_all().await;
            self.metrics.record_cache_invalidation();
        }
    }
}

/// Live availability check for one PulseID field.
///
/// Cloning yields another handle to the same field. All methods that schedule
/// work must be called from within a Tokio runtime.
#[derive(Clone)]
pub struct AvailabilityChecker {
    pub(super) shared: Arc<Shared>,
}

impl AvailabilityChecker {
    pub fn new(
        backend: Arc<dyn AvailabilityBackend>,
        cache: Arc<AvailabilityCache>,
        settings: AvailabilitySettings,
    ) -> Self {
        Self::with_generator(backend, cache, settings, SuggestionGenerator::new())
    }

    pub fn with_generator(
        backend: Arc<dyn AvailabilityBackend>,
        cache: Arc<AvailabilityCache>,
        settings: AvailabilitySettings,
        suggester: SuggestionGenerator,
    ) -> Self {
        let (updates, _) = watch::channel(CheckSnapshot::default());
        Self {
            shared: Arc::new(Shared {
                backend,
                cache,
                settings,
                suggester,
                metrics: Arc::new(CheckMetrics::new()),
                state: Mutex::new(FieldState::default()),
                updates,
            }),
        }
    }

    pub fn settings(&self) -> &AvailabilitySettings {
        &self.shared.settings
    }

    /// The field's value changed
    pub fn on_input(&self, raw: &str, touched: bool) {
        self.on_input_with(raw, touched, false);
    }

    /// The field's value changed; `force_bypass` skips the cache for this check
    pub fn on_input_with(&self, raw: &str, touched: bool, force_bypass: bool) {
        let normalized = normalize_candidate(raw);
        let mut state = self.shared.lock_state();

        if state.closed || state.phase != ReservationPhase::Editing {
            return;
        }

        let unchanged = state.touched && state.live == normalized;
        if unchanged
            && !force_bypass
            && matches!(
                state.status,
                AvailabilityStatus::Checking | AvailabilityStatus::Available | AvailabilityStatus::Taken
            )
        {
            return;
        }

        state.timer.cancel();
        state.live = normalized;
        state.touched = touched;
        state.suggestions.clear();

        if !touched {
            state.status = AvailabilityStatus::Unknown;
            self.shared.publish(&state);
            return;
        }

        let parsed = Candidate::parse(&state.live, &self.shared.settings.rules());
        match parsed {
            Err(ValidationError::TooShort { .. }) => {
                state.status = AvailabilityStatus::Unknown;
            }
            Err(error) => {
                state.status = AvailabilityStatus::Invalid(error);
            }
            Ok(candidate) => {
                state.status = AvailabilityStatus::Checking;
                let bypass = force_bypass || state.force_bypass;
                let request = CheckRequest::new(candidate.into_inner(), bypass, state.generation);
                self.schedule(&mut state, request, self.shared.settings.debounce());
            }
        }

        self.shared.publish(&state);
    }

    /// Flush the cache and recheck the live candidate right away
    pub fn refresh(&self) {
        let mut state = self.shared.lock_state();
        if state.closed || state.phase != ReservationPhase::Editing {
            return;
        }
        state.timer.cancel();

        let ctx = TaskContext::new(&self.shared);
        let request = Candidate::parse(&state.live, &self.shared.settings.rules())
            .ok()
            .map(|candidate| CheckRequest::new(candidate.into_inner(), true, state.generation));
        if request.is_some() {
            state.touched = true;
            state.status = AvailabilityStatus::Checking;
            state.suggestions.clear();
            self.shared.publish(&state);
        }
        drop(state);

        tracing::debug!("Manual availability refresh");
        tokio::spawn(async move {
            ctx.cache.invalidate_all().await;
            ctx.metrics.record_cache_invalidation();
            if let Some(request) = request {
                ctx.run(request).await;
            }
        });
    }

    /// Make a suggestion the live candidate; it is checked like typed input.
    /// Ignored outside `Editing`, like typed input.
    pub fn select_suggestion(&self, suggestion: &str) {
        self.on_input_with(suggestion, true, false);
    }

    /// Current state of the field
    pub fn snapshot(&self) -> CheckSnapshot {
        self.shared.updates.borrow().clone()
    }

    /// Receive every state change of the field
    pub fn subscribe(&self) -> watch::Receiver<CheckSnapshot> {
        self.shared.updates.subscribe()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.shared.metrics.snapshot()
    }

    /// Whether a debounced check is waiting to fire
    pub fn has_pending_check(&self) -> bool {
        self.shared.lock_state().timer.is_pending()
    }

    /// Tear the field down: clear the timer and ignore late results
    pub fn shutdown(&self) {
        let mut state = self.shared.lock_state();
        state.closed = true;
        state.timer.cancel();
        tracing::debug!("Availability checker shut down");
    }

    fn schedule(&self, state: &mut FieldState, request: CheckRequest, delay: Duration) {
        let field = Arc::downgrade(&self.shared);
        state.timer.schedule(delay, move || {
            let Some(shared) = field.upgrade() else {
                return;
            };
            let ctx = TaskContext::new(&shared);
            tokio::spawn(ctx.run(request));
        });
    }
}
