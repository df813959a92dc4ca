//! # Final Reservation Guard
//!
//! The UI may have shown "available" seconds ago; someone else can claim the
//! handle in between. Right before committing, the handle and the email are
//! re-checked concurrently, bypassing the cache, and the commit only goes
//! ahead when both are free.
//!
//! This is best-effort pre-validation. No lock is taken, so the backend's own
//! uniqueness constraint stays authoritative and its conflicts are mapped onto
//! the same rejection reasons.

use futures_util::future::join;
use serde::{Deserialize, Serialize};

use crate::availability::backend::{AccountInfo, ConflictField, ReservationRequest};
use crate::availability::checker::{AvailabilityChecker, AvailabilityStatus, ReservationPhase};
use crate::shared::candidate::{
    normalize_email, validate_display_name, validate_email, validate_password, Candidate,
};
use crate::shared::error::ReservationError;

/// The non-handle fields of the signup form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationForm {
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Proof of a committed reservation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservationReceipt {
    pub pulse_id: String,
    pub account: Option<AccountInfo>,
}

impl AvailabilityChecker {
    /// Re-validate and commit the live candidate.
    ///
    /// Never panics or leaves the field in `Reserving`: every outcome,
    /// including backend failures, comes back as a typed result.
    pub async fn submit(
        &self,
        form: ReservationForm,
    ) -> Result<ReservationReceipt, ReservationError> {
        let candidate = self.begin_reservation(&form)?;
        tracing::info!("Reserving PulseID '{}'", candidate);

        let outcome = self.guard_and_commit(&candidate, &form).await;
        self.finish_reservation(&candidate, &outcome);
        outcome
    }

    /// Validate locally and move the field to `Reserving`
    fn begin_reservation(&self, form: &ReservationForm) -> Result<Candidate, ReservationError> {
        let shared = &self.shared;
        let mut state = shared.lock_state();

        match state.phase {
            _ if state.closed => return Err(ReservationError::Closed),
            ReservationPhase::Committed => return Err(ReservationError::Closed),
            ReservationPhase::Reserving => return Err(ReservationError::AlreadyReserving),
            ReservationPhase::Editing => {}
        }

        let candidate = Candidate::parse(&state.live, &shared.settings.rules())?;
        validate_email(&normalize_email(&form.email))?;
        validate_password(&form.password)?;
        validate_display_name(&form.display_name)?;

        // The guard's own check supersedes any pending or in-flight one
        state.timer.cancel();
        state.phase = ReservationPhase::Reserving;
        state.generation += 1;
        shared.publish(&state);

        Ok(candidate)
    }

    async fn guard_and_commit(
        &self,
        candidate: &Candidate,
        form: &ReservationForm,
    ) -> Result<ReservationReceipt, ReservationError> {
        let shared = &self.shared;
        let email = normalize_email(&form.email);

        shared.metrics.record_query();
        let (handle_taken, email_registered) = join(
            shared.backend.query_handle_taken(candidate.as_str()),
            shared.backend.query_email_registered(&email),
        )
        .await;

        if let Ok(taken) = handle_taken {
            shared.cache.put(candidate.as_str(), !taken).await;
        }

        match (handle_taken, email_registered) {
            (Ok(true), _) => {
                tracing::info!("PulseID '{}' was claimed before commit", candidate);
                return Err(ReservationError::HandleTaken {
                    suggestions: shared.suggestions_for(candidate.as_str()),
                });
            }
            (_, Ok(true)) => return Err(ReservationError::EmailRegistered),
            (Ok(false), Ok(false)) => {}
            (Err(error), _) | (_, Err(error)) => {
                tracing::warn!("Pre-commit check for '{}' failed: {}", candidate, error);
                return Err(ReservationError::CheckFailed(error));
            }
        }

        let request = ReservationRequest {
            pulse_id: candidate.to_string(),
            email,
            password: form.password.clone(),
            display_name: form.display_name.trim().to_string(),
        };

        let response = match shared.backend.commit_reservation(request).await {
            Ok(response) => response,
            Err(error) => {
                tracing::warn!("Commit for '{}' failed: {}", candidate, error);
                return Err(ReservationError::CommitFailed(error.to_string()));
            }
        };

        if response.success {
            shared.cache.put(candidate.as_str(), false).await;
            return Ok(ReservationReceipt {
                pulse_id: candidate.to_string(),
                account: response.account,
            });
        }

        match response.conflict {
            Some(ConflictField::Handle) => {
                shared.cache.put(candidate.as_str(), false).await;
                Err(ReservationError::HandleTaken {
                    suggestions: shared.suggestions_for(candidate.as_str()),
                })
            }
            Some(ConflictField::Email) => Err(ReservationError::EmailRegistered),
            None => Err(ReservationError::CommitFailed(
                response
                    .error
                    .unwrap_or_else(|| "unknown error".to_string()),
            )),
        }
    }

    /// Leave `Reserving` and reflect the outcome on the field
    fn finish_reservation(
        &self,
        candidate: &Candidate,
        outcome: &Result<ReservationReceipt, ReservationError>,
    ) {
        let shared = &self.shared;
        let mut state = shared.lock_state();
        let still_live = state.live == candidate.as_str();
        state.generation += 1;

        match outcome {
            Ok(_) => {
                shared.metrics.record_commit();
                tracing::info!("PulseID '{}' reserved", candidate);
                state.phase = ReservationPhase::Committed;
                state.suggestions.clear();
            }
            Err(error) => {
                shared.metrics.record_rejection();
                state.phase = ReservationPhase::Editing;
                if let ReservationError::HandleTaken { suggestions } = error {
                    if still_live {
                        state.status = AvailabilityStatus::Taken;
                        state.suggestions = suggestions.clone();
                    }
                }
            }
        }

        shared.publish(&state);
    }
}
