/**
 * Authentication Module
 *
 * Signup outcome state and the background submit used by the signup form.
 */

use std::sync::mpsc::{channel, Receiver};

use tokio::runtime::Handle;

use crate::availability::{AccountInfo, AvailabilityChecker, ReservationForm, ReservationReceipt};
use crate::shared::error::ReservationError;

pub type SignupResult = Result<ReservationReceipt, ReservationError>;

/// Authentication state
#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub authenticated: bool,
    pub account: Option<AccountInfo>,
    pub error: Option<String>,
    pub loading: bool,
    /// Set when the email already has an account
    pub sign_in_hint: bool,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
        self.sign_in_hint = false;
    }

    pub fn set_error(&mut self, error: String) {
        self.error = Some(error);
    }
}

/// Run the reservation guard on `runtime` and hand the outcome back to the UI thread
pub fn signup(runtime: &Handle, checker: AvailabilityChecker, form: ReservationForm) -> Receiver<SignupResult> {
    let (tx, rx) = channel();
    runtime.spawn(async move {
        let result = checker.submit(form).await;
        let _ = tx.send(result);
    });
    rx
}
