//! Error types for voice-note transcription.

use thiserror::Error;

/// Errors that can occur while transcribing an audio message.
#[derive(Error, Debug)]
pub enum TranscriptionError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// The media URL could not be fetched.
    #[error("Audio download failed with status {status}")]
    Download { status: u16 },

    /// Transcription provider returned an error response (4xx, 5xx).
    #[error("Provider error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Provider response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Transcriber configuration error (e.g. missing API key).
    #[error("Configuration error: {0}")]
    Configuration(String),
}
