//! Final reservation guard integration tests

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use futures_util::future::join;
use pretty_assertions::assert_eq;
use tokio::time::{sleep, Instant};
use voicemate::availability::{AvailabilityStatus, ConflictField, ReservationPhase};
use voicemate::shared::{BackendError, ReservationError};

use crate::common::*;

#[tokio::test(start_paused = true)]
async fn test_submit_commits_free_handle() {
    let backend = Arc::new(ScriptedBackend::new());
    let checker = checker(backend.clone());

    checker.on_input("Rick", true);
    past_debounce().await;

    let receipt = crate::assert_ok!(checker.submit(form()).await);
    assert_eq!(receipt.pulse_id, "rick");
    let account = receipt.account.unwrap();
    assert_eq!(account.email, "rick@citadel.dev");
    assert_eq!(account.token.as_deref(), Some("test-token"));

    let commits = backend.commits();
    assert_eq!(commits.len(), 1);
    assert_eq!(commits[0].pulse_id, "rick");
    assert_eq!(commits[0].display_name, "Rick Sanchez");
    assert_eq!(checker.snapshot().phase, ReservationPhase::Committed);
}

#[tokio::test(start_paused = true)]
async fn test_handle_claimed_after_check_is_rejected() {
    let backend = Arc::new(ScriptedBackend::new());
    let checker = checker(backend.clone());

    checker.on_input("rick", true);
    settle().await;
    crate::assert_field!(checker, "rick", AvailabilityStatus::Available);

    // Someone else signs up in between
    backend.set_taken("rick");
    let error = checker.submit(form()).await.unwrap_err();

    assert_matches!(error, ReservationError::HandleTaken { ref suggestions } if !suggestions.is_empty());
    assert!(backend.commits().is_empty());

    let snapshot = checker.snapshot();
    assert_eq!(snapshot.status, AvailabilityStatus::Taken);
    assert_eq!(snapshot.suggestions, error.suggestions());
    assert_eq!(snapshot.phase, ReservationPhase::Editing);
}

#[tokio::test(start_paused = true)]
async fn test_guard_ignores_cached_answer() {
    let backend = Arc::new(ScriptedBackend::with_taken(["rick"]));
    let cache = long_cache();
    cache.put("rick", true).await;
    let checker = checker_with_cache(backend.clone(), cache.clone());

    checker.on_input("rick", true);
    settle().await;
    // The field trusts the cache
    crate::assert_field!(checker, "rick", AvailabilityStatus::Available);
    assert_eq!(backend.handle_query_count(), 0);

    crate::assert_err!(checker.submit(form()).await, ReservationError::HandleTaken { .. });
    assert_eq!(backend.handle_query_count(), 1);
    assert_eq!(cache.get("rick").await.map(|e| e.available), Some(false));
}

#[tokio::test(start_paused = true)]
async fn test_registered_email_is_rejected() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.register_email("rick@citadel.dev");
    let checker = checker(backend.clone());
    checker.on_input("rick", true);

    let error = checker.submit(form()).await.unwrap_err();

    assert_eq!(error, ReservationError::EmailRegistered);
    assert!(error.suggests_sign_in());
    crate::assert_contains!(error.to_string(), "sign in");
    assert!(backend.commits().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_email_is_normalized_before_check() {
    let backend = Arc::new(ScriptedBackend::new());
    let checker = checker(backend.clone());
    checker.on_input("rick", true);

    let mut shouty = form();
    shouty.email = "  RICK@Citadel.dev ".to_string();
    crate::assert_ok!(checker.submit(shouty).await);

    assert_eq!(backend.email_queries(), vec!["rick@citadel.dev".to_string()]);
    assert_eq!(backend.commits()[0].email, "rick@citadel.dev");
}

#[tokio::test(start_paused = true)]
async fn test_taken_handle_wins_over_registered_email() {
    let backend = Arc::new(ScriptedBackend::with_taken(["rick"]));
    backend.register_email("rick@citadel.dev");
    let checker = checker(backend.clone());
    checker.on_input("rick", true);

    crate::assert_err!(checker.submit(form()).await, ReservationError::HandleTaken { .. });
}

#[tokio::test(start_paused = true)]
async fn test_handle_and_email_are_checked_concurrently() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.set_delay("rick", Duration::from_secs(1));
    backend.set_delay("rick@citadel.dev", Duration::from_secs(1));
    let checker = checker(backend.clone());
    checker.on_input("rick", true);

    let started = Instant::now();
    crate::assert_ok!(checker.submit(form()).await);

    assert!(started.elapsed() < Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_check_failure_blocks_commit() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.set_email_failing(true);
    let checker = checker(backend.clone());
    checker.on_input("rick", true);

    let error = checker.submit(form()).await.unwrap_err();

    assert_matches!(error, ReservationError::CheckFailed(BackendError::Status { status: 503, .. }));
    assert!(backend.commits().is_empty());
    assert_eq!(checker.snapshot().phase, ReservationPhase::Editing);
    assert_eq!(checker.snapshot().consecutive_errors, 0);
}

#[tokio::test(start_paused = true)]
async fn test_commit_conflicts_map_to_rejections() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.conflict_on_commit(ConflictField::Handle);
    let checker = checker(backend.clone());
    checker.on_input("rick", true);

    crate::assert_err!(checker.submit(form()).await, ReservationError::HandleTaken { .. });
    assert_eq!(checker.snapshot().status, AvailabilityStatus::Taken);

    backend.conflict_on_commit(ConflictField::Email);
    checker.on_input("morty", true);
    let error = checker.submit(form()).await.unwrap_err();
    assert_eq!(error, ReservationError::EmailRegistered);
    assert_eq!(backend.commits().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_double_submit_is_refused() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.set_delay("rick", Duration::from_millis(300));
    let checker = checker(backend.clone());
    checker.on_input("rick", true);

    let (first, second) = join(checker.submit(form()), checker.submit(form())).await;

    crate::assert_ok!(first);
    assert_eq!(second.unwrap_err(), ReservationError::AlreadyReserving);
    assert_eq!(backend.commits().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_committed_field_is_closed() {
    let backend = Arc::new(ScriptedBackend::new());
    let checker = checker(backend.clone());
    checker.on_input("rick", true);
    crate::assert_ok!(checker.submit(form()).await);

    checker.on_input("morty", true);
    settle().await;
    assert_eq!(checker.snapshot().candidate, "rick");
    assert_eq!(checker.submit(form()).await.unwrap_err(), ReservationError::Closed);
    assert_eq!(checker.metrics().reservations_committed, 1);
}

#[tokio::test(start_paused = true)]
async fn test_submit_cancels_pending_debounce() {
    let backend = Arc::new(ScriptedBackend::new());
    let checker = checker(backend.clone());

    checker.on_input("rick", true);
    assert!(checker.has_pending_check());
    crate::assert_ok!(checker.submit(form()).await);
    assert!(!checker.has_pending_check());

    settle().await;
    // Only the guard's own query
    assert_eq!(backend.handle_query_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_late_live_result_does_not_undo_rejection() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.set_delay("rick", Duration::from_secs(3));
    let cache = long_cache();
    let checker = checker_with_cache(backend.clone(), cache.clone());

    checker.on_input("rick", true);
    past_debounce().await;
    // The live check saw "rick" free and is still in flight
    assert_eq!(backend.handle_query_count(), 1);

    backend.clear_delay("rick");
    backend.set_taken("rick");
    let error = checker.submit(form()).await.unwrap_err();
    assert_matches!(error, ReservationError::HandleTaken { .. });

    settle().await;

    let snapshot = checker.snapshot();
    assert_eq!(snapshot.status, AvailabilityStatus::Taken);
    assert_eq!(snapshot.suggestions, error.suggestions());
    assert_eq!(snapshot.phase, ReservationPhase::Editing);
    assert_eq!(checker.metrics().stale_responses, 1);
    assert_eq!(cache.get("rick").await.map(|e| e.available), Some(false));
}

#[tokio::test(start_paused = true)]
async fn test_field_is_frozen_while_reserving() {
    let backend = Arc::new(ScriptedBackend::new());
    backend.set_delay("rick", Duration::from_secs(1));
    backend.set_delay("rick@citadel.dev", Duration::from_secs(3));
    let checker = checker(backend.clone());

    checker.on_input("rick", true);
    past_debounce().await;

    let edits = async {
        sleep(Duration::from_millis(100)).await;
        checker.on_input("morty", true);
        checker.select_suggestion("rick_1");
        checker.refresh();
        // Long enough for the live check to land
        sleep(Duration::from_secs(2)).await;
        checker.snapshot()
    };
    let (outcome, during) = join(checker.submit(form()), edits).await;

    let receipt = crate::assert_ok!(outcome);
    assert_eq!(receipt.pulse_id, "rick");
    assert_eq!(during.candidate, "rick");
    assert_eq!(during.phase, ReservationPhase::Reserving);
    assert_eq!(during.status, AvailabilityStatus::Checking);

    settle().await;

    let snapshot = checker.snapshot();
    assert_eq!(snapshot.candidate, "rick");
    assert_eq!(snapshot.phase, ReservationPhase::Committed);
    assert_eq!(backend.handle_queries(), vec!["rick".to_string(), "rick".to_string()]);
    assert_eq!(backend.commits()[0].pulse_id, "rick");
    assert_eq!(checker.metrics().stale_responses, 1);
}
