//! Configuration module for the Salus gateway
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`SALUS_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use salus::config::SalusConfig;
//!
//! // Load defaults
//! let config = SalusConfig::default();
//! assert_eq!(config.server.port, 8000);
//!
//! // Parse from TOML
//! let toml = r#"
//! [server]
//! port = 9000
//! "#;
//! let config: SalusConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 9000);
//! ```

pub mod agent;
pub mod error;
pub mod logging;
pub mod server;
pub mod transcription;
pub mod whatsapp;

pub use agent::AgentConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use transcription::TranscriptionConfig;
pub use whatsapp::WhatsAppConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the gateway.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SalusConfig {
    /// Webhook HTTP server settings
    pub server: ServerConfig,
    /// Reply-agent (LLM provider) settings
    pub agent: AgentConfig,
    /// Outbound WhatsApp provider settings
    pub whatsapp: WhatsAppConfig,
    /// Voice-note transcription settings
    pub transcription: TranscriptionConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl SalusConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports SALUS_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("SALUS_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("SALUS_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("SALUS_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SALUS_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(url) = std::env::var("SALUS_AGENT_BASE_URL") {
            self.agent.base_url = url;
        }
        if let Ok(model) = std::env::var("SALUS_AGENT_MODEL") {
            self.agent.model = model;
        }
        if let Ok(url) = std::env::var("SALUS_WHATSAPP_BASE_URL") {
            self.whatsapp.base_url = url;
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        for (field, url) in [
            ("agent.base_url", &self.agent.base_url),
            ("whatsapp.base_url", &self.whatsapp.base_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "URL cannot be empty".to_string(),
                });
            }
        }

        if self.transcription.enabled && self.transcription.base_url.is_empty() {
            return Err(ConfigError::Validation {
                field: "transcription.base_url".to_string(),
                message: "URL cannot be empty when transcription is enabled".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.agent.temperature) {
            return Err(ConfigError::Validation {
                field: "agent.temperature".to_string(),
                message: "temperature must be in [0.0, 2.0]".to_string(),
            });
        }

        if !self
            .whatsapp
            .country_code
            .chars()
            .all(|c| c.is_ascii_digit())
            || self.whatsapp.country_code.is_empty()
        {
            return Err(ConfigError::Validation {
                field: "whatsapp.country_code".to_string(),
                message: "country code must be digits".to_string(),
            });
        }

        Ok(())
    }
}
