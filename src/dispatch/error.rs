//! Error types for reply-agent dispatch.

use thiserror::Error;

/// Errors that can occur while generating a reply.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// Network connectivity error (DNS, connection refused, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded deadline.
    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    /// LLM provider returned an error response (4xx, 5xx).
    #[error("Provider error {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Provider response doesn't match the expected format.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Agent configuration error (e.g. missing API key).
    #[error("Configuration error: {0}")]
    Configuration(String),
}
