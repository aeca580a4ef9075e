//! OpenRouter reply agent.
//!
//! Speaks the OpenAI-compatible chat-completions protocol against a
//! configurable base URL with Bearer authentication. Any provider exposing
//! that wire format works; OpenRouter is the default.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use super::prompt::build_system_prompt;
use super::{AgentReply, AgentRequest, DispatchError, ReplyAgent};
use crate::config::AgentConfig;

/// Reply agent backed by an OpenAI-compatible chat-completions endpoint.
#[derive(Debug)]
pub struct OpenRouterAgent {
    base_url: String,
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout: Duration,
    client: Client,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: String,
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

impl OpenRouterAgent {
    pub fn new(
        base_url: String,
        api_key: String,
        model: String,
        temperature: f64,
        max_tokens: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
            temperature,
            max_tokens,
            timeout,
            client: Client::new(),
        }
    }

    /// Build an agent from configuration, resolving the API key from the
    /// environment variable the config names.
    pub fn from_config(config: &AgentConfig) -> Result<Self, DispatchError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            DispatchError::Configuration(format!(
                "API key environment variable '{}' is not set",
                config.api_key_env
            ))
        })?;
        Ok(Self::new(
            config.base_url.clone(),
            api_key,
            config.model.clone(),
            config.temperature,
            config.max_tokens,
            Duration::from_secs(config.timeout_seconds),
        ))
    }
}

#[async_trait]
impl ReplyAgent for OpenRouterAgent {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn generate_reply(&self, request: &AgentRequest) -> Result<AgentReply, DispatchError> {
        let url = format!("{}/chat/completions", self.base_url);
        let system_prompt = build_system_prompt(request.decision.workflow);

        let mut messages = vec![ChatMessage {
            role: "system",
            content: &system_prompt,
        }];
        for turn in &request.history {
            messages.push(ChatMessage {
                role: "user",
                content: turn,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: &request.message,
        });

        let body = ChatRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let started = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DispatchError::Timeout(self.timeout.as_millis() as u64)
                } else {
                    DispatchError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(DispatchError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            DispatchError::InvalidResponse(format!("Failed to parse completion response: {e}"))
        })?;

        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                DispatchError::InvalidResponse("Completion response had no choices".to_string())
            })?;

        Ok(AgentReply {
            text,
            model: if completion.model.is_empty() {
                self.model.clone()
            } else {
                completion.model
            },
            processing_time: started.elapsed(),
        })
    }
}
