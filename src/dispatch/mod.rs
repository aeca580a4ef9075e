//! Reply-agent abstraction layer.
//!
//! The gateway treats reply generation as an opaque capability behind the
//! [`ReplyAgent`] trait: hand it the message plus the routing decision,
//! get back natural-language text. The production implementation calls an
//! OpenAI-compatible chat-completions API; tests plug in stubs.

use async_trait::async_trait;
use std::time::Duration;

pub mod error;
pub mod openrouter;
pub mod prompt;

pub use error::DispatchError;
pub use openrouter::OpenRouterAgent;

use crate::triage::RoutingDecision;

/// Everything the agent needs to compose a reply for one message.
#[derive(Debug, Clone)]
pub struct AgentRequest {
    /// Raw message text as the patient wrote it.
    pub message: String,
    /// Patient phone number (for logging context only).
    pub phone: String,
    /// WhatsApp display name, when the webhook carried one.
    pub contact_name: Option<String>,
    /// The triage outcome driving prompt selection.
    pub decision: RoutingDecision,
    /// Recent conversation turns, oldest first. Currently always empty;
    /// populated once conversation persistence lands.
    pub history: Vec<String>,
}

/// A generated reply with dispatch metadata.
#[derive(Debug, Clone)]
pub struct AgentReply {
    pub text: String,
    /// Model that produced the reply, as reported by the provider.
    pub model: String,
    pub processing_time: Duration,
}

/// Unified interface for reply generation.
///
/// Object-safe; used as `Arc<dyn ReplyAgent>` so the pipeline never
/// branches on the concrete implementation.
#[async_trait]
pub trait ReplyAgent: Send + Sync + 'static {
    /// Human-readable name for logging (e.g. "openrouter").
    fn name(&self) -> &str;

    /// Generate a reply for the given request.
    ///
    /// # Returns
    ///
    /// - `Ok(AgentReply)` on success
    /// - `Err(DispatchError::Upstream)` if the provider returned 4xx/5xx
    /// - `Err(DispatchError::Network)` / `Timeout` on transport failures
    /// - `Err(DispatchError::InvalidResponse)` if the payload can't be parsed
    async fn generate_reply(&self, request: &AgentRequest) -> Result<AgentReply, DispatchError>;
}

/// Apology sent when reply generation fails outright.
pub fn fallback_reply(contact_name: Option<&str>) -> String {
    let greeting = match contact_name {
        Some(name) if !name.is_empty() => format!("Olá, {name}! "),
        _ => "Olá! ".to_string(),
    };
    format!(
        "{greeting}Desculpe, estou enfrentando dificuldades técnicas no momento. \
         Por favor, tente novamente em alguns instantes ou aguarde: nossa equipe \
         de atendimento dará continuidade à sua solicitação."
    )
}

/// Notice sent to the patient when a conversation is handed to a human.
pub fn handoff_notice() -> &'static str {
    "Entendo que você precisa de atendimento especializado. Estou transferindo \
     sua conversa para um de nossos atendentes. Aguarde um momento, por favor."
}
