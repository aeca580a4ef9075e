//! Voice-note transcription.
//!
//! WhatsApp voice notes arrive as a media URL instead of text. The
//! [`Transcriber`] trait turns that URL into text so audio messages pass
//! through the same triage as typed ones. The production implementation
//! downloads the file and sends it to an OpenAI-compatible
//! `/audio/transcriptions` endpoint (Whisper).

pub mod error;

pub use error::TranscriptionError;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::config::TranscriptionConfig;

/// Unified interface for audio transcription.
///
/// Object-safe; the webhook holds an `Option<Arc<dyn Transcriber>>` and
/// skips the audio branch entirely when none is configured.
#[async_trait]
pub trait Transcriber: Send + Sync + 'static {
    /// Human-readable name for logging (e.g. "whisper").
    fn name(&self) -> &str;

    /// Fetch the audio at `audio_url` and return its transcript.
    async fn transcribe_url(&self, audio_url: &str) -> Result<String, TranscriptionError>;
}

/// Transcriber backed by an OpenAI-compatible `/audio/transcriptions`
/// endpoint.
#[derive(Debug)]
pub struct WhisperTranscriber {
    base_url: String,
    api_key: String,
    model: String,
    language: String,
    timeout: Duration,
    client: Client,
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperTranscriber {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        language: String,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            language,
            timeout,
            client: Client::new(),
        }
    }

    /// Build a transcriber from configuration, resolving the API key from
    /// the environment variable the config names.
    pub fn from_config(config: &TranscriptionConfig) -> Result<Self, TranscriptionError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            TranscriptionError::Configuration(format!(
                "API key environment variable '{}' is not set",
                config.api_key_env
            ))
        })?;
        Ok(Self::new(
            config.base_url.clone(),
            api_key,
            config.model.clone(),
            config.language.clone(),
            Duration::from_secs(config.timeout_seconds),
        ))
    }

    async fn download_audio(&self, url: &str) -> Result<Vec<u8>, TranscriptionError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    TranscriptionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptionError::Download {
                status: status.as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| TranscriptionError::Network(e.to_string()))?;
        tracing::debug!(size_bytes = bytes.len(), "audio downloaded");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    fn name(&self) -> &str {
        "whisper"
    }

    async fn transcribe_url(&self, audio_url: &str) -> Result<String, TranscriptionError> {
        let audio = self.download_audio(audio_url).await?;

        // WhatsApp voice notes are OGG/Opus.
        let form = Form::new()
            .part("file", Part::bytes(audio).file_name("audio.ogg"))
            .text("model", self.model.clone())
            .text("language", self.language.clone());

        let url = format!("{}/audio/transcriptions", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TranscriptionError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    TranscriptionError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TranscriptionError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let transcription: TranscriptionResponse = response.json().await.map_err(|e| {
            TranscriptionError::InvalidResponse(format!(
                "Failed to parse transcription response: {e}"
            ))
        })?;

        tracing::info!(
            text_length = transcription.text.len(),
            "audio transcription successful"
        );
        Ok(transcription.text)
    }
}
