//! Per-message orchestration.
//!
//! One inbound message flows through: triage → agent dispatch → escalation
//! gate → delivery. The pipeline owns only shared immutable state, so any
//! number of messages can be processed concurrently; within a single
//! message the sequence is strictly ordered.
//!
//! Collaborator failures stop here: a dispatch failure turns into a
//! fallback apology plus escalation, and delivery failures are logged but
//! never propagated back to the webhook.

use std::sync::Arc;

use crate::delivery::WhatsAppClient;
use crate::dispatch::{fallback_reply, handoff_notice, AgentRequest, ReplyAgent};
use crate::triage::{EscalationGate, RoutingDecision, TriageRouter};

/// An inbound message as extracted from the webhook payload.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub phone: String,
    pub text: String,
    pub message_id: Option<String>,
    pub contact_name: Option<String>,
}

/// Outcome of processing one message, for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Whether the agent produced a reply (false means fallback was sent).
    pub replied: bool,
    /// Whether the conversation was flagged for human handoff.
    pub escalated: bool,
}

/// Classify-dispatch-deliver orchestrator.
pub struct MessagePipeline {
    triage: TriageRouter,
    gate: EscalationGate,
    agent: Arc<dyn ReplyAgent>,
    whatsapp: Arc<WhatsAppClient>,
}

impl MessagePipeline {
    pub fn new(
        triage: TriageRouter,
        gate: EscalationGate,
        agent: Arc<dyn ReplyAgent>,
        whatsapp: Arc<WhatsAppClient>,
    ) -> Self {
        Self {
            triage,
            gate,
            agent,
            whatsapp,
        }
    }

    /// Classify a message without running the rest of the pipeline.
    ///
    /// The webhook handler uses this to answer immediately while the reply
    /// generation continues in the background.
    pub fn classify(&self, text: &str) -> RoutingDecision {
        self.triage.classify(text)
    }

    /// Run the full reply flow for one message.
    pub async fn handle(&self, message: InboundMessage, decision: RoutingDecision) -> PipelineOutcome {
        tracing::info!(
            phone = %message.phone,
            workflow = decision.workflow.as_str(),
            confidence = decision.confidence,
            escalate_immediately = decision.escalate_immediately,
            reason = %decision.reason,
            "routing decision"
        );

        let request = AgentRequest {
            message: message.text.clone(),
            phone: message.phone.clone(),
            contact_name: message.contact_name.clone(),
            decision: decision.clone(),
            history: self.conversation_history(&message.phone),
        };

        let (reply_text, replied) = match self.agent.generate_reply(&request).await {
            Ok(reply) => {
                tracing::info!(
                    phone = %message.phone,
                    agent = self.agent.name(),
                    model = %reply.model,
                    processing_ms = reply.processing_time.as_millis() as u64,
                    "agent reply generated"
                );
                (reply.text, true)
            }
            Err(e) => {
                tracing::error!(phone = %message.phone, error = %e, "agent dispatch failed");
                (fallback_reply(message.contact_name.as_deref()), false)
            }
        };

        self.deliver(&message.phone, &reply_text).await;

        // A failed dispatch always reaches a human; otherwise the gate
        // decides based on the message, the routing and the reply.
        let escalated =
            !replied || self.gate.should_escalate(&message.text, &decision, &reply_text);
        if escalated {
            tracing::warn!(
                phone = %message.phone,
                workflow = decision.workflow.as_str(),
                "handing conversation to human staff"
            );
            self.deliver(&message.phone, handoff_notice()).await;
        }

        PipelineOutcome { replied, escalated }
    }

    async fn deliver(&self, phone: &str, text: &str) {
        if let Err(e) = self.whatsapp.send_text(phone, text).await {
            tracing::error!(phone = %phone, error = %e, "failed to deliver message");
        }
    }

    // TODO: fetch the last turns from storage once conversation
    // persistence exists; agents currently reply without history.
    fn conversation_history(&self, _phone: &str) -> Vec<String> {
        Vec::new()
    }
}
