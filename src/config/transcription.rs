//! Voice-note transcription configuration

use serde::{Deserialize, Serialize};

/// Configuration for the audio transcription provider.
///
/// Voice notes are downloaded and transcribed before triage so they go
/// through the same routing as typed messages. Disable when no
/// OpenAI-compatible transcription endpoint is available.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    pub enabled: bool,
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    /// Language hint passed to the provider; clinic traffic is Portuguese.
    pub language: String,
    pub timeout_seconds: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "whisper-1".to_string(),
            api_key_env: "SALUS_OPENAI_API_KEY".to_string(),
            language: "pt".to_string(),
            timeout_seconds: 60,
        }
    }
}
