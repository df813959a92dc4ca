/**
 * API Client Module
 *
 * HTTP implementation of the availability backend, talking to the VoiceMate API.
 */

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;

use crate::availability::{AvailabilityBackend, CommitResponse, ReservationRequest};
use crate::egui_app::config::Config;
use crate::egui_app::types::{AuthResponse, AvailabilityResponse, ConflictBody};
use crate::shared::error::BackendError;

/// `AvailabilityBackend` over the VoiceMate REST API
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    config: Config,
}

impl HttpBackend {
    pub fn new(config: Config) -> Result<Self, BackendError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self { client, config })
    }

    async fn get_availability(&self, path: &str, key: &str, value: &str) -> Result<bool, BackendError> {
        let url = self.config.api_url(path);
        let response = self
            .client
            .get(&url)
            .query(&[(key, value)])
            .send()
            .await?;

        let body: AvailabilityResponse = expect_json(response).await?;
        Ok(body.available)
    }
}

/// Fail on non-2xx, then decode the body
async fn expect_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_else(|_| status.to_string());
        return Err(BackendError::status(status.as_u16(), error_text));
    }

    response
        .json()
        .await
        .map_err(|e| BackendError::Decode(e.to_string()))
}

#[async_trait]
impl AvailabilityBackend for HttpBackend {
    async fn query_handle_taken(&self, candidate: &str) -> Result<bool, BackendError> {
        let available = self
            .get_availability("/api/pulse-ids/availability", "pulse_id", candidate)
            .await?;
        Ok(!available)
    }

    async fn query_email_registered(&self, email: &str) -> Result<bool, BackendError> {
        let available = self
            .get_availability("/api/auth/email-availability", "email", email)
            .await?;
        Ok(!available)
    }

    async fn commit_reservation(
        &self,
        request: ReservationRequest,
    ) -> Result<CommitResponse, BackendError> {
        let url = self.config.api_url("/api/auth/signup");
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();

        if status.is_success() {
            let auth: AuthResponse = response
                .json()
                .await
                .map_err(|e| BackendError::Decode(e.to_string()))?;
            return Ok(CommitResponse::committed(auth.into()));
        }

        let error_text = response.text().await.unwrap_or_else(|_| status.to_string());

        if status == StatusCode::CONFLICT {
            if let Ok(body) = serde_json::from_str::<ConflictBody>(&error_text) {
                if let Some(field) = body.conflict {
                    return Ok(CommitResponse::conflict(field));
                }
                if let Some(error) = body.error {
                    return Ok(CommitResponse::failed(error));
                }
            }
        }

        tracing::warn!("Signup failed: {} - {}", status, error_text);
        Ok(CommitResponse::failed(format!("{} - {}", status, error_text)))
    }
}
