//! Outbound WhatsApp delivery.
//!
//! Thin client for an Evolution-API style gateway: `POST
//! /message/sendText` with a Bearer token and a `{ number, text }` payload.
//! Retries and phone normalization live here so the rest of the pipeline
//! can treat delivery as "send text to recipient".

pub mod error;

pub use error::DeliveryError;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::WhatsAppConfig;

/// Delay before the first retry; grows linearly per attempt.
const RETRY_BASE_DELAY: Duration = Duration::from_millis(500);

/// Client for sending WhatsApp messages through the provider gateway.
pub struct WhatsAppClient {
    base_url: String,
    api_key: String,
    country_code: String,
    max_retries: u32,
    timeout: Duration,
    client: Client,
}

#[derive(Serialize)]
struct SendTextPayload<'a> {
    number: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct SendTextResponse {
    #[serde(default)]
    id: Option<String>,
}

/// Provider acknowledgment for a delivered message.
#[derive(Debug, Clone)]
pub struct SendReceipt {
    /// Provider-assigned message id, when reported.
    pub message_id: Option<String>,
}

impl WhatsAppClient {
    pub fn new(
        base_url: String,
        api_key: String,
        country_code: String,
        max_retries: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            country_code,
            max_retries,
            timeout,
            client: Client::new(),
        }
    }

    /// Build a client from configuration, resolving the API key from the
    /// environment variable the config names.
    pub fn from_config(config: &WhatsAppConfig) -> Result<Self, DeliveryError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            DeliveryError::Configuration(format!(
                "API key environment variable '{}' is not set",
                config.api_key_env
            ))
        })?;
        Ok(Self::new(
            config.base_url.clone(),
            api_key,
            config.country_code.clone(),
            config.max_retries,
            Duration::from_secs(config.timeout_seconds),
        ))
    }

    /// Send a text message, retrying transient failures.
    ///
    /// Network errors and 5xx responses are retried up to the configured
    /// maximum with linear backoff; 4xx responses fail immediately.
    pub async fn send_text(&self, phone: &str, text: &str) -> Result<SendReceipt, DeliveryError> {
        let number = normalize_phone(phone, &self.country_code)
            .ok_or_else(|| DeliveryError::InvalidRecipient(phone.to_string()))?;
        let url = format!("{}/message/sendText", self.base_url);
        let payload = SendTextPayload {
            number: &number,
            text,
        };

        let mut last_status = 0u16;
        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                tokio::time::sleep(RETRY_BASE_DELAY * attempt).await;
                tracing::debug!(attempt, number = %number, "retrying message delivery");
            }

            let result = self
                .client
                .post(&url)
                .header("authorization", format!("Bearer {}", self.api_key))
                .json(&payload)
                .timeout(self.timeout)
                .send()
                .await;

            let response = match result {
                Ok(response) => response,
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "delivery request failed");
                    if attempt == self.max_retries {
                        return Err(DeliveryError::Network(e.to_string()));
                    }
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let body: SendTextResponse = response.json().await.unwrap_or(SendTextResponse {
                    id: None,
                });
                tracing::info!(
                    number = %number,
                    message_id = body.id.as_deref().unwrap_or("unknown"),
                    "message delivered"
                );
                return Ok(SendReceipt {
                    message_id: body.id,
                });
            }

            if status.is_client_error() {
                let message = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(DeliveryError::Rejected {
                    status: status.as_u16(),
                    message,
                });
            }

            last_status = status.as_u16();
            tracing::warn!(attempt, status = last_status, "provider error, will retry");
        }

        Err(DeliveryError::Unavailable {
            attempts: self.max_retries + 1,
            status: last_status,
        })
    }
}

/// Reduce a phone number to digits and prefix the country code when the
/// number doesn't already carry it. Returns None when no digits remain.
fn normalize_phone(phone: &str, country_code: &str) -> Option<String> {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    if digits.starts_with(country_code) {
        Some(digits)
    } else {
        Some(format!("{country_code}{digits}"))
    }
}
