//! Backend collaborators of the availability workflow
//!
//! The workflow only ever talks to the backend through [`AvailabilityBackend`]:
//! two read-only uniqueness lookups and the commit call that actually creates
//! the account. The backend is assumed to enforce uniqueness authoritatively;
//! everything on the client side is best-effort pre-validation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::shared::error::BackendError;

/// Which unique field a commit collided on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictField {
    Handle,
    Email,
}

/// Everything needed to create an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub pulse_id: String,
    pub email: String,
    pub password: String,
    pub display_name: String,
}

/// Account returned by a successful commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: String,
    pub pulse_id: String,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Outcome of the commit call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conflict: Option<ConflictField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
}

impl CommitResponse {
    pub fn committed(account: AccountInfo) -> Self {
        Self {
            success: true,
            conflict: None,
            error: None,
            account: Some(account),
        }
    }

    pub fn conflict(field: ConflictField) -> Self {
        Self {
            success: false,
            conflict: Some(field),
            error: None,
            account: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            conflict: None,
            error: Some(error.into()),
            account: None,
        }
    }
}

/// The backend as seen by the availability workflow.
///
/// The two queries must be idempotent and side-effect free.
#[async_trait]
pub trait AvailabilityBackend: Send + Sync {
    /// Whether `candidate` already belongs to someone
    async fn query_handle_taken(&self, candidate: &str) -> Result<bool, BackendError>;

    /// Whether `email` already has an account
    async fn query_email_registered(&self, email: &str) -> Result<bool, BackendError>;

    /// Create the account and claim the handle
    async fn commit_reservation(
        &self,
        request: ReservationRequest,
    ) -> Result<CommitResponse, BackendError>;
}

#[derive(Debug, Default)]
struct Accounts {
    handles: HashSet<String>,
    emails: HashSet<String>,
    by_id: HashMap<Uuid, AccountInfo>,
}

/// In-memory backend with real uniqueness enforcement.
///
/// Used for offline runs of the desktop client and in tests.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    accounts: RwLock<Accounts>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend where `handles` are already claimed
    pub fn with_taken_handles<I, S>(handles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let accounts = Accounts {
            handles: handles.into_iter().map(Into::into).collect(),
            ..Default::default()
        };
        Self {
            accounts: RwLock::new(accounts),
        }
    }

    /// Claim a handle out of band, as another session would
    pub async fn claim_handle(&self, handle: impl Into<String>) {
        self.accounts.write().await.handles.insert(handle.into());
    }

    /// Register an email out of band
    pub async fn register_email(&self, email: impl Into<String>) {
        self.accounts.write().await.emails.insert(email.into());
    }

    pub async fn account_count(&self) -> usize {
        self.accounts.read().await.by_id.len()
    }
}

#[async_trait]
impl AvailabilityBackend for InMemoryBackend {
    async fn query_handle_taken(&self, candidate: &str) -> Result<bool, BackendError> {
        Ok(self.accounts.read().await.handles.contains(candidate))
    }

    async fn query_email_registered(&self, email: &str) -> Result<bool, BackendError> {
        Ok(self.accounts.read().await.emails.contains(email))
    }

    async fn commit_reservation(
        &self,
        request: ReservationRequest,
    ) -> Result<CommitResponse, BackendError> {
        let mut accounts = self.accounts.write().await;

        if accounts.handles.contains(&request.pulse_id) {
            return Ok(CommitResponse::conflict(ConflictField::Handle));
        }
        if accounts.emails.contains(&request.email) {
            return Ok(CommitResponse::conflict(ConflictField::Email));
        }

        let id = Uuid::new_v4();
        let account = AccountInfo {
            id: id.to_string(),
            pulse_id: request.pulse_id.clone(),
            email: request.email.clone(),
            display_name: request.display_name,
            token: None,
        };
        accounts.handles.insert(request.pulse_id);
        accounts.emails.insert(request.email);
        accounts.by_id.insert(id, account.clone());

        Ok(CommitResponse::committed(account))
    }
}
