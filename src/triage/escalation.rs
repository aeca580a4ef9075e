//! Post-reply escalation gate.
//!
//! Runs after the agent has produced a reply, independently of the routing
//! decision's own `escalate_immediately` flag. The router's emergency check
//! is a narrow gate at a conservative threshold; this one is the last line
//! of defense and is deliberately broader, so the set of escalated
//! conversations is always a superset of what the router demanded.

use crate::triage::decision::{Priority, RoutingDecision};

/// Keyword-driven human-handoff decision.
///
/// Stateless and immutable after construction; safe to share across tasks.
pub struct EscalationGate {
    emergency_keywords: Vec<&'static str>,
    complexity_indicators: Vec<&'static str>,
    error_indicators: Vec<&'static str>,
}

impl Default for EscalationGate {
    fn default() -> Self {
        Self {
            // Broader than the classifier's emergency set on purpose:
            // includes self-harm phrasings the router's patterns miss.
            emergency_keywords: vec![
                "suicídio",
                "suicidio",
                "desespero",
                "autolesão",
                "autolesao",
                "não aguento mais",
                "nao aguento mais",
                "acabar com tudo",
                "me matar",
                "morrer",
                "não vale a pena",
                "nao vale a pena",
                "sem saída",
                "sem saida",
                "não tem jeito",
                "nao tem jeito",
                "vou me matar",
                "quero morrer",
                "penso em morrer",
            ],
            complexity_indicators: vec![
                "não entendi",
                "nao entendi",
                "confuso",
                "não ficou claro",
                "preciso falar com alguém",
                "quero falar com atendente",
                "isso não resolve",
                "isso nao resolve",
                "muito complicado",
            ],
            error_indicators: vec!["erro", "problema", "não foi possível", "nao foi possivel"],
        }
    }
}

impl EscalationGate {
    /// Decide whether a human must take over this conversation.
    ///
    /// Disjunctive, short-circuiting on the first rule that fires:
    /// 1. the router assigned high priority;
    /// 2. an emergency keyword appears in the message;
    /// 3. a complexity indicator appears in the message;
    /// 4. an error indicator appears in the agent's reply.
    pub fn should_escalate(
        &self,
        message_text: &str,
        decision: &RoutingDecision,
        agent_response: &str,
    ) -> bool {
        if decision.priority == Priority::High {
            tracing::warn!(
                workflow = decision.workflow.as_str(),
                "escalating: high priority routing"
            );
            return true;
        }

        let message = message_text.to_lowercase();
        if let Some(keyword) = self
            .emergency_keywords
            .iter()
            .find(|kw| message.contains(*kw))
        {
            tracing::warn!(keyword, "escalating: emergency keyword in message");
            return true;
        }

        if let Some(indicator) = self
            .complexity_indicators
            .iter()
            .find(|ind| message.contains(*ind))
        {
            tracing::info!(indicator, "escalating: complexity indicator in message");
            return true;
        }

        let response = agent_response.to_lowercase();
        if let Some(indicator) = self
            .error_indicators
            .iter()
            .find(|ind| response.contains(*ind))
        {
            tracing::info!(indicator, "escalating: error indicator in agent reply");
            return true;
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::decision::{RoutingDecision, Workflow};

    fn routine_decision() -> RoutingDecision {
        RoutingDecision::routine(
            Workflow::MedicalConsultation,
            0.7,
            "test".to_string(),
            vec![],
        )
    }

    #[test]
    fn high_priority_routing_escalates() {
        let gate = EscalationGate::default();
        let decision = RoutingDecision::emergency(1.0, vec![]);
        assert!(gate.should_escalate("qualquer coisa", &decision, "resposta"));
    }

    #[test]
    fn emergency_keyword_in_message_escalates() {
        let gate = EscalationGate::default();
        assert!(gate.should_escalate("não aguento mais", &routine_decision(), "resposta"));
        assert!(gate.should_escalate("quero morrer", &routine_decision(), "resposta"));
        assert!(gate.should_escalate("estou sem saída", &routine_decision(), "resposta"));
    }

    #[test]
    fn emergency_keyword_match_is_case_insensitive() {
        let gate = EscalationGate::default();
        assert!(gate.should_escalate("NÃO AGUENTO MAIS", &routine_decision(), "resposta"));
    }

    #[test]
    fn complexity_indicator_escalates() {
        let gate = EscalationGate::default();
        assert!(gate.should_escalate("não entendi nada", &routine_decision(), "resposta"));
        assert!(gate.should_escalate(
            "preciso falar com alguém de verdade",
            &routine_decision(),
            "resposta"
        ));
    }

    #[test]
    fn error_indicator_in_reply_escalates() {
        let gate = EscalationGate::default();
        assert!(gate.should_escalate(
            "qual o horário de funcionamento?",
            &routine_decision(),
            "desculpe, não foi possível completar sua solicitação"
        ));
    }

    #[test]
    fn benign_exchange_does_not_escalate() {
        let gate = EscalationGate::default();
        assert!(!gate.should_escalate(
            "qual o horário de funcionamento?",
            &routine_decision(),
            "a clínica funciona de segunda a sexta, das 8h às 18h"
        ));
    }

    #[test]
    fn gate_is_superset_of_router_escalation() {
        // Whatever the router marked for immediate escalation, the gate must
        // also escalate (rule 1), regardless of message or reply content.
        let gate = EscalationGate::default();
        let decision = RoutingDecision::emergency(0.4, vec![]);
        assert!(gate.should_escalate("", &decision, ""));
    }
}
