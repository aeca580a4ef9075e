//! WhatsApp gateway (Evolution-API style) configuration

use serde::{Deserialize, Serialize};

/// Configuration for the outbound WhatsApp provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WhatsAppConfig {
    pub base_url: String,
    pub api_key_env: String,
    /// Provider instance name, when the gateway multiplexes instances.
    pub instance: String,
    pub timeout_seconds: u64,
    /// Retries for transient delivery failures (network errors, 5xx).
    pub max_retries: u32,
    /// Country code prefixed to numbers that don't already carry it.
    pub country_code: String,
}

impl Default for WhatsAppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key_env: "SALUS_WHATSAPP_API_KEY".to_string(),
            instance: "clinic-main".to_string(),
            timeout_seconds: 30,
            max_retries: 2,
            country_code: "55".to_string(),
        }
    }
}
