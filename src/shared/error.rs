//! Shared Error Types
//!
//! This module defines the error taxonomy used by the availability workflow
//! and the signup client. None of these errors are allowed to escape into the
//! render path: every asynchronous boundary converts failures into one of the
//! types below.
//!
//! # Error Categories
//!
//! - `ValidationError` - Local input validation, never reaches the backend
//! - `BackendError` - Transport or decoding failures talking to the backend
//! - `ReservationError` - Typed rejection reasons returned by `submit()`
//!
//! # Usage
//!
//! ```rust
//! use voicemate::shared::error::ValidationError;
//!
//! let error = ValidationError::TooShort { min: 3 };
//! assert_eq!(error.to_string(), "PulseID must be at least 3 characters");
//! ```
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread boundaries.
use thiserror::Error;

/// Input validation failures, reported inline next to the offending field
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Candidate handle is below the minimum length
    #[error("PulseID must be at least {min} characters")]
    TooShort {
        /// Minimum number of characters
        min: usize,
    },

    /// Candidate handle is above the maximum length
    #[error("PulseID must be at most {max} characters")]
    TooLong {
        /// Maximum number of characters
        max: usize,
    },

    /// Candidate handle contains characters outside `[a-z0-9_]`
    #[error("PulseID may only contain letters, numbers, and underscores")]
    InvalidCharacters,

    /// Email address is malformed
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Password is too short
    #[error("Password must be at least {min} characters")]
    WeakPassword {
        /// Minimum number of characters
        min: usize,
    },

    /// Display name is empty
    #[error("Display name is required")]
    MissingDisplayName,

    /// Display name is too long
    #[error("Display name must be at most {max} characters")]
    DisplayNameTooLong {
        /// Maximum number of characters
        max: usize,
    },
}

/// Failures talking to the backend collaborators
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The request never produced a response (connection, timeout, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with an unexpected status
    #[error("Backend returned {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body or reason phrase
        message: String,
    },

    /// The response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a new status error
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::status(status.as_u16(), err.to_string())
        } else {
            Self::network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(format!("JSON error: {}", err))
    }
}

/// Why a reservation attempt did not commit
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReservationError {
    /// The form failed local validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The handle was claimed by someone else since the last check
    #[error("PulseID is already taken")]
    HandleTaken {
        /// Fresh alternatives for the taken handle
        suggestions: Vec<String>,
    },

    /// The email already belongs to an account; sign in instead
    #[error("An account with this email already exists. Please sign in instead")]
    EmailRegistered,

    /// The pre-commit availability checks could not be completed
    #[error("Could not verify availability: {0}")]
    CheckFailed(BackendError),

    /// The commit call failed for a reason other than a known conflict
    #[error("Account creation failed: {0}")]
    CommitFailed(String),

    /// Another reservation for this field is still in flight
    #[error("A reservation is already in progress")]
    AlreadyReserving,

    /// The field was torn down
    #[error("The signup form is no longer active")]
    Closed,
}

impl ReservationError {
    /// Whether the user should be sent to sign-in rather than registration
    pub fn suggests_sign_in(&self) -> bool {
        matches!(self, Self::EmailRegistered)
    }

    /// Suggestions attached to a handle conflict, if any
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::HandleTaken { suggestions } => suggestions,
            _ => &[],
        }
    }
}
