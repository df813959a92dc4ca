use std::sync::mpsc::Receiver;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::availability::{
    AvailabilityBackend, AvailabilityCache, AvailabilityChecker, CheckSnapshot, ReservationForm,
};
use crate::egui_app::auth::{signup, SignupResult};
use crate::egui_app::{AppView, AuthState, Config};

/// Central application state shared across egui views.
pub struct AppState {
    pub config: Config,
    pub auth_state: AuthState,
    pub current_view: AppView,
    pub pulse_id_input: String,
    pub email_input: String,
    pub display_name_input: String,
    pub password_input: String,
    pub confirm_password_input: String,
    pub signup_result: Option<Receiver<SignupResult>>,
    pub checker: AvailabilityChecker,
    backend: Arc<dyn AvailabilityBackend>,
    cache: Arc<AvailabilityCache>,
    runtime: Runtime,
}

impl AppState {
    pub fn new(config: Config, backend: Arc<dyn AvailabilityBackend>) -> std::io::Result<Self> {
        let runtime = Runtime::new()?;
        let settings = config.availability().clone();
        let cache = Arc::new(AvailabilityCache::with_ttl(settings.cache_ttl()));
        let checker = AvailabilityChecker::new(backend.clone(), cache.clone(), settings);

        tracing::info!("AppState initialized against {}", config.server_url());

        Ok(Self {
            config,
            auth_state: AuthState::new(),
            current_view: AppView::Signup,
            pulse_id_input: String::new(),
            email_input: String::new(),
            display_name_input: String::new(),
            password_input: String::new(),
            confirm_password_input: String::new(),
            signup_result: None,
            checker,
            backend,
            cache,
            runtime,
        })
    }

    pub fn availability(&self) -> CheckSnapshot {
        self.checker.snapshot()
    }

    /// Forward the PulseID field to the checker after an edit
    pub fn on_pulse_id_changed(&mut self) {
        let _guard = self.runtime.enter();
        self.checker.on_input(&self.pulse_id_input, true);
    }

    pub fn pick_suggestion(&mut self, suggestion: &str) {
        let _guard = self.runtime.enter();
        self.pulse_id_input = suggestion.to_string();
        self.checker.select_suggestion(suggestion);
    }

    pub fn refresh_availability(&mut self) {
        let _guard = self.runtime.enter();
        self.checker.refresh();
    }

    pub fn check_signup_result(&mut self) {
        if let Some(ref rx) = self.signup_result {
            if let Ok(result) = rx.try_recv() {
                self.signup_result = None;
                self.auth_state.loading = false;

                match result {
                    Ok(receipt) => {
                        tracing::info!("✓ Signup successful: @{}", receipt.pulse_id);
                        let token = receipt.account.as_ref().and_then(|a| a.token.clone());
                        self.config.set_token(token);
                        self.auth_state.authenticated = true;
                        self.auth_state.account = receipt.account;
                        self.auth_state.clear_error();
                        self.pulse_id_input = receipt.pulse_id;
                        self.current_view = AppView::Welcome;
                        self.password_input.clear();
                        self.confirm_password_input.clear();
                    }
                    Err(e) => {
                        tracing::warn!("✗ Signup failed: {}", e);
                        self.auth_state.sign_in_hint = e.suggests_sign_in();
                        self.auth_state.set_error(e.to_string());
                    }
                }
            }
        }
    }

    pub fn handle_signup(&mut self) {
        if self.auth_state.loading {
            return;
        }

        self.auth_state.clear_error();

        if self.password_input != self.confirm_password_input {
            self.auth_state
                .set_error("Passwords do not match".to_string());
            return;
        }

        self.auth_state.loading = true;

        let form = ReservationForm {
            email: self.email_input.clone(),
            password: self.password_input.clone(),
            display_name: self.display_name_input.clone(),
        };

        let rx = signup(self.runtime.handle(), self.checker.clone(), form);
        self.signup_result = Some(rx);
    }

    /// Drop the committed account and start a fresh signup
    pub fn start_over(&mut self) {
        self.checker.shutdown();
        self.checker = AvailabilityChecker::new(
            self.backend.clone(),
            self.cache.clone(),
            self.config.availability().clone(),
        );

        self.config.clear_token();
        self.auth_state = AuthState::new();
        self.current_view = AppView::Signup;
        self.signup_result = None;
        self.pulse_id_input.clear();
        self.email_input.clear();
        self.display_name_input.clear();
        self.password_input.clear();
        self.confirm_password_input.clear();
    }
}
