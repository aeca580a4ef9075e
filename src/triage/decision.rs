//! Routing decision value object.

use serde::{Deserialize, Serialize};

/// Downstream processing system a message is routed to.
///
/// A single destination exists today (the LLM reply agent pipeline); the
/// closed enum keeps downstream matches exhaustive if more appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    #[default]
    Agent,
}

/// Workflow that handles a classified message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    EmergencyEscalation,
    AppointmentBooking,
    AppointmentConfirmation,
    AppointmentRescheduling,
    AppointmentGeneral,
    MedicalConsultation,
}

impl Workflow {
    /// Stable wire/log name, matching the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Workflow::EmergencyEscalation => "emergency_escalation",
            Workflow::AppointmentBooking => "appointment_booking",
            Workflow::AppointmentConfirmation => "appointment_confirmation",
            Workflow::AppointmentRescheduling => "appointment_rescheduling",
            Workflow::AppointmentGeneral => "appointment_general",
            Workflow::MedicalConsultation => "medical_consultation",
        }
    }
}

/// Message priority. High is reserved for emergency escalations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    Normal,
    High,
}

/// The classifier's output: which workflow handles a message and why.
///
/// Produced atomically by one classification pass and never mutated
/// afterwards; it is logged and handed downstream as-is.
///
/// Invariants, enforced by the constructors:
/// - `escalate_immediately` iff `workflow == EmergencyEscalation`
/// - `priority == High` iff `escalate_immediately`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingDecision {
    pub destination: Destination,
    pub workflow: Workflow,
    /// Heuristic [0,1] score; not a calibrated probability.
    pub confidence: f64,
    pub priority: Priority,
    pub escalate_immediately: bool,
    /// Human-readable explanation. Diagnostic only, never drives control flow.
    pub reason: String,
    /// Identifiers of the patterns that fired, in table order.
    pub matched_patterns: Vec<&'static str>,
}

impl RoutingDecision {
    /// Emergency decision: high priority, immediate escalation.
    pub(crate) fn emergency(confidence: f64, matched_patterns: Vec<&'static str>) -> Self {
        Self {
            destination: Destination::Agent,
            workflow: Workflow::EmergencyEscalation,
            confidence,
            priority: Priority::High,
            escalate_immediately: true,
            reason: format!("Emergency keywords detected (score: {confidence:.2})"),
            matched_patterns,
        }
    }

    /// Non-emergency decision: normal priority, no immediate escalation.
    pub(crate) fn routine(
        workflow: Workflow,
        confidence: f64,
        reason: String,
        matched_patterns: Vec<&'static str>,
    ) -> Self {
        debug_assert!(workflow != Workflow::EmergencyEscalation);
        Self {
            destination: Destination::Agent,
            workflow,
            confidence,
            priority: Priority::Normal,
            escalate_immediately: false,
            reason,
            matched_patterns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emergency_constructor_upholds_invariants() {
        let decision = RoutingDecision::emergency(0.8, vec!["emergency_terms"]);
        assert_eq!(decision.workflow, Workflow::EmergencyEscalation);
        assert_eq!(decision.priority, Priority::High);
        assert!(decision.escalate_immediately);
    }

    #[test]
    fn routine_constructor_upholds_invariants() {
        let decision = RoutingDecision::routine(
            Workflow::AppointmentBooking,
            0.74,
            "Scheduling request".to_string(),
            vec![],
        );
        assert_eq!(decision.priority, Priority::Normal);
        assert!(!decision.escalate_immediately);
    }

    #[test]
    fn workflow_serializes_snake_case() {
        let json = serde_json::to_string(&Workflow::AppointmentConfirmation).unwrap();
        assert_eq!(json, "\"appointment_confirmation\"");
        assert_eq!(
            Workflow::AppointmentConfirmation.as_str(),
            "appointment_confirmation"
        );
    }

    #[test]
    fn destination_serializes_as_agent() {
        let json = serde_json::to_string(&Destination::Agent).unwrap();
        assert_eq!(json, "\"agent\"");
    }

    #[test]
    fn decision_round_trips_through_serde() {
        let decision = RoutingDecision::emergency(1.0, vec!["emergency_terms"]);
        let json = serde_json::to_string(&decision).unwrap();
        let back: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back["workflow"], "emergency_escalation");
        assert_eq!(back["priority"], "high");
        assert_eq!(back["escalate_immediately"], true);
    }
}
