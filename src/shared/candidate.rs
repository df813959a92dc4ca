//! PulseID candidate and signup field validation
//!
//! A candidate is whatever the user typed into the PulseID field, normalized:
//! all whitespace removed and lowercased. Candidates have no identity beyond
//! their normalized string value until a reservation succeeds.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::error::ValidationError;

/// Default minimum PulseID length
pub const DEFAULT_MIN_LENGTH: usize = 3;

/// Default maximum PulseID length
pub const DEFAULT_MAX_LENGTH: usize = 30;

/// Minimum password length accepted before submit
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum display name length
pub const MAX_DISPLAY_NAME_LENGTH: usize = 50;

/// Length limits applied to candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateRules {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for CandidateRules {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// A normalized, validated PulseID candidate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate(String);

impl Candidate {
    /// Normalize `raw` and validate it against `rules`
    pub fn parse(raw: &str, rules: &CandidateRules) -> Result<Self, ValidationError> {
        let normalized = normalize_candidate(raw);
        validate_normalized(&normalized, rules)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Strip all whitespace and lowercase
pub fn normalize_candidate(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `c` may appear in a PulseID
pub fn is_handle_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'
}

fn validate_normalized(candidate: &str, rules: &CandidateRules) -> Result<(), ValidationError> {
    let len = candidate.chars().count();
    if len < rules.min_length {
        return Err(ValidationError::TooShort {
            min: rules.min_length,
        });
    }
    if len > rules.max_length {
        return Err(ValidationError::TooLong {
            max: rules.max_length,
        });
    }
    if !candidate.chars().all(is_handle_char) {
        return Err(ValidationError::InvalidCharacters);
    }
    Ok(())
}

/// Trim and lowercase an email address
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Basic structural email check: `local@domain.tld`
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ValidationError::InvalidEmail);
    };

    let domain_ok = domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');

    if local.is_empty() || !domain_ok || email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::WeakPassword {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

pub fn validate_display_name(display_name: &str) -> Result<(), ValidationError> {
    let trimmed = display_name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingDisplayName);
    }
    if trimmed.chars().count() > MAX_DISPLAY_NAME_LENGTH {
        return Err(ValidationError::DisplayNameTooLong {
            max: MAX_DISPLAY_NAME_LENGTH,
        });
    }
    Ok(())
}
