//! Intent triage for inbound clinic messages.
//!
//! This module is the decision core of the gateway: it turns free-text
//! WhatsApp messages into a [`RoutingDecision`] through a staged, weighted
//! pattern-matching pass with a hard emergency short-circuit.
//!
//! Stages, in order:
//! 1. normalize the text ([`normalize`]);
//! 2. compute the emergency score; above [`tables::EMERGENCY_THRESHOLD`]
//!    the message routes to emergency escalation and nothing else runs;
//! 3. compute scheduling and general-medical scores;
//! 4. scheduling wins only if it beats the medical score and exceeds
//!    [`tables::SCHEDULING_THRESHOLD`], in which case the sub-workflow
//!    resolver picks the specific scheduling flow; everything else falls
//!    back to `medical_consultation` with a confidence floor.
//!
//! Scores are additive (pattern-match density plus fixed keyword boosts)
//! and clamped to [0, 1]. The arithmetic here is the normative algorithm,
//! not an approximation: tests pin exact scores for canonical inputs.
//!
//! Everything in this module is pure and synchronous over immutable tables,
//! so classification can run concurrently from any number of tasks.

pub mod decision;
pub mod escalation;
pub mod normalize;
pub mod tables;
pub mod workflow;

pub use decision::{Destination, Priority, RoutingDecision, Workflow};
pub use escalation::EscalationGate;
pub use normalize::normalize;
pub use tables::TriageTables;
pub use workflow::resolve_scheduling_workflow;

use tables::{
    EMERGENCY_THRESHOLD, MEDICAL_CONFIDENCE_FLOOR, SCHEDULING_THRESHOLD,
};

/// Rule-based message classifier.
///
/// Holds the immutable pattern tables; construct once and share. Tests
/// inject their own [`TriageTables`] instead of mutating globals.
pub struct TriageRouter {
    tables: TriageTables,
}

impl TriageRouter {
    pub fn new(tables: TriageTables) -> Self {
        Self { tables }
    }

    /// Router backed by the production Brazilian Portuguese tables.
    pub fn with_defaults() -> Self {
        Self::new(TriageTables::default_pt_br())
    }

    /// Classify a raw message into a routing decision.
    ///
    /// Total: every input, including the empty string, yields a valid
    /// decision (unclassifiable text falls back to medical consultation,
    /// never to emergency or scheduling).
    pub fn classify(&self, raw_text: &str) -> RoutingDecision {
        let text = normalize(raw_text);

        tracing::debug!(
            message_length = raw_text.len(),
            "analyzing message for routing"
        );

        let emergency_score = self.emergency_score(&text);
        if emergency_score > EMERGENCY_THRESHOLD {
            return RoutingDecision::emergency(
                emergency_score,
                self.tables.emergency_patterns.matches(&text),
            );
        }

        let scheduling_score = self.scheduling_score(&text);
        let medical_score = self.medical_score(&text);

        if scheduling_score > medical_score && scheduling_score > SCHEDULING_THRESHOLD {
            let workflow = resolve_scheduling_workflow(&self.tables, &text);
            RoutingDecision::routine(
                workflow,
                scheduling_score,
                format!(
                    "Scheduling request - {} (score: {scheduling_score:.2})",
                    workflow.as_str()
                ),
                self.tables.scheduling_patterns.matches(&text),
            )
        } else {
            RoutingDecision::routine(
                Workflow::MedicalConsultation,
                medical_score.max(MEDICAL_CONFIDENCE_FLOOR),
                format!(
                    "Medical consultation or general inquiry \
                     (medical: {medical_score:.2}, scheduling: {scheduling_score:.2})"
                ),
                self.tables.medical_patterns.matches(&text),
            )
        }
    }

    /// Emergency score: pattern density, plus a flat boost per critical
    /// word found literally in the text, plus a distress-phrase boost.
    fn emergency_score(&self, text: &str) -> f64 {
        let score = self.tables.emergency_patterns.density(text)
            + self.tables.critical_words.score(text)
            + if self.tables.distress_phrases.any_match(text) {
                tables::DISTRESS_PHRASE_BOOST
            } else {
                0.0
            };
        score.min(1.0)
    }

    /// Scheduling score: pattern density plus scheduling, confirmation and
    /// reschedule keyword boosts.
    fn scheduling_score(&self, text: &str) -> f64 {
        let score = self.tables.scheduling_patterns.density(text)
            + self.tables.scheduling_terms.score(text)
            + self.tables.confirmation_terms.score(text)
            + self.tables.reschedule_terms.score(text);
        score.min(1.0)
    }

    /// General-medical score: pattern density plus question-word, greeting,
    /// medical-info and clinic-info boosts.
    fn medical_score(&self, text: &str) -> f64 {
        let score = self.tables.medical_patterns.density(text)
            + self.tables.question_words.score(text)
            + self.tables.greetings.score(text)
            + self.tables.medical_terms.score(text)
            + self.tables.clinic_terms.score(text);
        score.min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> TriageRouter {
        TriageRouter::with_defaults()
    }

    #[test]
    fn distress_call_routes_to_emergency() {
        let decision = router().classify("Socorro! Estou passando muito mal!");
        assert_eq!(decision.workflow, Workflow::EmergencyEscalation);
        assert_eq!(decision.priority, Priority::High);
        assert!(decision.escalate_immediately);
        // "socorro" (+0.4), "muito mal" distress phrase (+0.3) and two
        // pattern hits (2/6) saturate the clamp.
        assert!((decision.confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn booking_request_routes_to_booking() {
        let decision = router().classify("Gostaria de agendar uma consulta");
        assert_eq!(decision.destination, Destination::Agent);
        assert_eq!(decision.workflow, Workflow::AppointmentBooking);
        assert!(decision.confidence > 0.5);
        // One pattern hit (1/7) plus "agendar" and "consulta" boosts.
        assert!((decision.confidence - (1.0 / 7.0 + 0.6)).abs() < 1e-9);
        assert_eq!(decision.matched_patterns, vec!["booking_verbs"]);
    }

    #[test]
    fn greeting_routes_to_medical_with_floor_confidence() {
        let decision = router().classify("Olá, bom dia");
        assert_eq!(decision.workflow, Workflow::MedicalConsultation);
        // Greeting signals alone stay far below the floor.
        assert!((decision.confidence - 0.7).abs() < 1e-9);
        assert_eq!(decision.priority, Priority::Normal);
        assert!(!decision.escalate_immediately);
    }

    #[test]
    fn empty_message_falls_back_to_medical() {
        let decision = router().classify("");
        assert_eq!(decision.workflow, Workflow::MedicalConsultation);
        assert!((decision.confidence - 0.7).abs() < 1e-9);
        assert!(decision.matched_patterns.is_empty());
    }

    #[test]
    fn confirmation_message_routes_to_confirmation() {
        let decision = router().classify("Confirmar consulta de amanhã");
        assert_eq!(decision.workflow, Workflow::AppointmentConfirmation);
    }

    #[test]
    fn reschedule_message_routes_to_rescheduling() {
        let decision = router().classify("Preciso remarcar minha consulta");
        assert_eq!(decision.workflow, Workflow::AppointmentRescheduling);
    }

    #[test]
    fn gibberish_falls_back_to_medical() {
        let decision = router().classify("xyz123");
        assert_eq!(decision.workflow, Workflow::MedicalConsultation);
        assert!(decision.confidence >= 0.7);
    }

    #[test]
    fn socorro_always_short_circuits() {
        // The critical-word boost alone (+0.4) clears the 0.3 threshold,
        // so any message containing "socorro" is an emergency.
        let decision = router().classify("acho que preciso de socorro com o formulário");
        assert_eq!(decision.workflow, Workflow::EmergencyEscalation);
        assert!(decision.escalate_immediately);
    }

    #[test]
    fn emergency_check_runs_before_scheduling() {
        // Scheduling words present, but the emergency gate fires first.
        let decision = router().classify("urgente, preciso marcar consulta, dor no peito");
        assert_eq!(decision.workflow, Workflow::EmergencyEscalation);
    }

    #[test]
    fn confirmation_outranks_booking_in_mixed_message() {
        let decision = router().classify("quero agendar mas confirmo que sim");
        assert_eq!(decision.workflow, Workflow::AppointmentConfirmation);
    }

    #[test]
    fn classification_is_deterministic() {
        let text = "Bom dia, vc pode remarcar minha consulta pq não posso ir??";
        let first = router().classify(text);
        let second = router().classify(text);
        assert_eq!(first, second);
    }

    #[test]
    fn confidence_is_always_clamped() {
        // Stack enough boosts to overflow the raw sum.
        let decision =
            router().classify("agendar marcar consulta médico horário exame confirmar sim ok");
        assert!(decision.confidence <= 1.0);
        assert!(decision.confidence >= 0.0);
    }

    #[test]
    fn emergency_confidence_is_the_emergency_score() {
        // Exactly one critical word, no pattern beyond the term itself:
        // 1/6 + 0.4 = 0.5666...
        let decision = router().classify("isso é urgente");
        assert_eq!(decision.workflow, Workflow::EmergencyEscalation);
        assert!((decision.confidence - (1.0 / 6.0 + 0.4)).abs() < 1e-9);
    }

    #[test]
    fn reason_mentions_selected_workflow() {
        let decision = router().classify("Gostaria de agendar uma consulta");
        assert!(decision.reason.contains("appointment_booking"));
    }
}
