/**
 * Shared Types Module
 *
 * Defines the app view states and the wire types spoken with the VoiceMate API.
 */

use serde::{Deserialize, Serialize};

use crate::availability::{AccountInfo, ConflictField};

/// Current app view/mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppView {
    /// Claim a PulseID and create the account
    Signup,
    /// Shown once the account exists
    Welcome,
}

/// Response of the two availability endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// User information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub pulse_id: String,
    pub email: String,
    pub display_name: String,
}

/// Signup response from server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserInfo,
}

impl From<AuthResponse> for AccountInfo {
    fn from(value: AuthResponse) -> Self {
        Self {
            id: value.user.id,
            pulse_id: value.user.pulse_id,
            email: value.user.email,
            display_name: value.user.display_name,
            token: Some(value.token),
        }
    }
}

/// Body of a `409 Conflict` signup response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictBody {
    #[serde(default)]
    pub conflict: Option<ConflictField>,
    #[serde(default)]
    pub error: Option<String>,
}
