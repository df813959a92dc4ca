//! Scriptable availability backend
//!
//! Records every call and lets a test decide what each call returns and how
//! long it takes, so out-of-order responses and failures can be staged.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;
use voicemate::availability::{
    AccountInfo, AvailabilityBackend, CommitResponse, ConflictField, ReservationRequest,
};
use voicemate::shared::BackendError;

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    taken: Mutex<HashSet<String>>,
    registered: Mutex<HashSet<String>>,
    delays: Mutex<HashMap<String, Duration>>,
    failing: AtomicBool,
    failing_email: AtomicBool,
    commit_conflict: Mutex<Option<ConflictField>>,
    handle_calls: Mutex<Vec<String>>,
    email_calls: Mutex<Vec<String>>,
    commits: Mutex<Vec<ReservationRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_taken<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let backend = Self::new();
        for handle in handles {
            backend.set_taken(handle);
        }
        backend
    }

    pub fn set_taken(&self, handle: impl Into<String>) {
        self.taken.lock().unwrap().insert(handle.into());
    }

    pub fn register_email(&self, email: impl Into<String>) {
        self.registered.lock().unwrap().insert(email.into());
    }

    /// Delay every query for `key` (a handle or an email). Handle queries
    /// answer with the state as of the moment they arrived.
    pub fn set_delay(&self, key: impl Into<String>, delay: Duration) {
        self.delays.lock().unwrap().insert(key.into(), delay);
    }

    pub fn clear_delay(&self, key: &str) {
        self.delays.lock().unwrap().remove(key);
    }

    /// Make handle queries fail with a network error
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn set_email_failing(&self, failing: bool) {
        self.failing_email.store(failing, Ordering::SeqCst);
    }

    /// Reject the next commits with a uniqueness conflict
    pub fn conflict_on_commit(&self, field: ConflictField) {
        *self.commit_conflict.lock().unwrap() = Some(field);
    }

    pub fn handle_queries(&self) -> Vec<String> {
        self.handle_calls.lock().unwrap().clone()
    }

    pub fn handle_query_count(&self) -> usize {
        self.handle_calls.lock().unwrap().len()
    }

    pub fn email_queries(&self) -> Vec<String> {
        self.email_calls.lock().unwrap().clone()
    }

    pub fn commits(&self) -> Vec<ReservationRequest> {
        self.commits.lock().unwrap().clone()
    }

    async fn delay_for(&self, key: &str) {
        let delay = self.delays.lock().unwrap().get(key).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AvailabilityBackend for ScriptedBackend {
    async fn query_handle_taken(&self, candidate: &str) -> Result<bool, BackendError> {
        self.handle_calls.lock().unwrap().push(candidate.to_string());
        let taken = self.taken.lock().unwrap().contains(candidate);
        self.delay_for(candidate).await;

        if self.failing.load(Ordering::SeqCst) {
            return Err(BackendError::network("connection refused"));
        }
        Ok(taken)
    }

    async fn query_email_registered(&self, email: &str) -> Result<bool, BackendError> {
        self.email_calls.lock().unwrap().push(email.to_string());
        self.delay_for(email).await;

        if self.failing_email.load(Ordering::SeqCst) {
            return Err(BackendError::status(503, "Service Unavailable"));
        }
        Ok(self.registered.lock().unwrap().contains(email))
    }

    async fn commit_reservation(
        &self,
        request: ReservationRequest,
    ) -> Result<CommitResponse, BackendError> {
        self.commits.lock().unwrap().push(request.clone());

        if let Some(field) = *self.commit_conflict.lock().unwrap() {
            return Ok(CommitResponse::conflict(field));
        }

        self.set_taken(request.pulse_id.clone());
        self.register_email(request.email.clone());

        Ok(CommitResponse::committed(AccountInfo {
            id: Uuid::new_v4().to_string(),
            pulse_id: request.pulse_id,
            email: request.email,
            display_name: request.display_name,
            token: Some("test-token".to_string()),
        }))
    }
}
