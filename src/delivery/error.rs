//! Error types for outbound message delivery.

use thiserror::Error;

/// Errors that can occur while sending a WhatsApp message.
#[derive(Error, Debug)]
pub enum DeliveryError {
    /// Network connectivity error, after retries were exhausted.
    #[error("Network error: {0}")]
    Network(String),

    /// Provider returned a client error (4xx); retrying won't help.
    #[error("Rejected by provider ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Provider kept failing with server errors after all retries.
    #[error("Provider unavailable after {attempts} attempts (last status {status})")]
    Unavailable { attempts: u32, status: u16 },

    /// Recipient phone number had no usable digits.
    #[error("Invalid recipient phone number: {0:?}")]
    InvalidRecipient(String),

    /// Client configuration error (e.g. missing API key).
    #[error("Configuration error: {0}")]
    Configuration(String),
}
