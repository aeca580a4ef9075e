//! Reply-agent (LLM provider) configuration

use serde::{Deserialize, Serialize};

/// Configuration for the OpenAI-compatible reply agent.
///
/// The API key is never stored in the file; `api_key_env` names the
/// environment variable that carries it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub base_url: String,
    pub model: String,
    pub api_key_env: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "anthropic/claude-3.5-sonnet".to_string(),
            api_key_env: "SALUS_OPENROUTER_API_KEY".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            timeout_seconds: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_agent_config_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.base_url, "https://openrouter.ai/api/v1");
        assert_eq!(config.api_key_env, "SALUS_OPENROUTER_API_KEY");
        assert!((config.temperature - 0.7).abs() < 1e-9);
    }
}
