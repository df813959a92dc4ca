//! Shared Module
//!
//! This module contains platform-agnostic types used by both the availability
//! workflow and the desktop client: candidate normalization and validation,
//! the error taxonomy, and application configuration.

/// PulseID and signup field validation
pub mod candidate;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use candidate::{normalize_candidate, normalize_email, Candidate, CandidateRules};
pub use error::{BackendError, ReservationError, ValidationError};
pub use config::{AppConfig, AppConfigBuilder, AvailabilitySettings, ConfigError};
