//! Property tests for the triage core.
//!
//! The classifier is pure arithmetic over immutable tables, so its
//! contract can be checked exhaustively-ish with generated inputs:
//! determinism, confidence bounds, the emergency-substring guarantee, and
//! the escalation gate being a superset of the router's own escalations.

use proptest::prelude::*;
use salus::triage::{
    normalize, EscalationGate, Priority, TriageRouter, Workflow,
};

proptest! {
    // Classification is a pure function: same input, same decision.
    #[test]
    fn classification_is_deterministic(text in ".{0,200}") {
        let router = TriageRouter::with_defaults();
        let first = router.classify(&text);
        let second = router.classify(&text);
        prop_assert_eq!(first, second);
    }

    // Confidence never leaves [0, 1], whatever the input.
    #[test]
    fn confidence_stays_in_bounds(text in ".{0,300}") {
        let decision = TriageRouter::with_defaults().classify(&text);
        prop_assert!(decision.confidence >= 0.0);
        prop_assert!(decision.confidence <= 1.0);
    }

    // Any message carrying a hard distress word routes to emergency: the
    // critical-word boost alone clears the threshold.
    #[test]
    fn socorro_always_routes_to_emergency(prefix in "[a-z ]{0,40}", suffix in "[a-z ]{0,40}") {
        let text = format!("{prefix} socorro {suffix}");
        let decision = TriageRouter::with_defaults().classify(&text);
        prop_assert_eq!(decision.workflow, Workflow::EmergencyEscalation);
        prop_assert!(decision.escalate_immediately);
        prop_assert_eq!(decision.priority, Priority::High);
    }

    #[test]
    fn emergencia_always_routes_to_emergency(prefix in "[a-z ]{0,40}") {
        let text = format!("{prefix} emergência");
        let decision = TriageRouter::with_defaults().classify(&text);
        prop_assert_eq!(decision.workflow, Workflow::EmergencyEscalation);
    }

    // The post-reply gate escalates at least everything the router did.
    #[test]
    fn gate_escalations_are_superset_of_router(text in ".{0,200}", reply in "[a-z ]{0,50}") {
        let router = TriageRouter::with_defaults();
        let gate = EscalationGate::default();
        let decision = router.classify(&text);
        if decision.escalate_immediately {
            prop_assert!(gate.should_escalate(&text, &decision, &reply));
        }
    }

    // Non-emergency decisions never carry emergency flags.
    #[test]
    fn routing_invariants_hold(text in ".{0,200}") {
        let decision = TriageRouter::with_defaults().classify(&text);
        let is_emergency = decision.workflow == Workflow::EmergencyEscalation;
        prop_assert_eq!(decision.escalate_immediately, is_emergency);
        prop_assert_eq!(decision.priority == Priority::High, is_emergency);
    }

    // The fallback category has a confidence floor.
    #[test]
    fn medical_fallback_has_floor(text in "[0-9xyz]{0,30}") {
        let decision = TriageRouter::with_defaults().classify(&text);
        if decision.workflow == Workflow::MedicalConsultation {
            prop_assert!(decision.confidence >= 0.7);
        }
    }

    // Normalization is total and idempotent.
    #[test]
    fn normalize_never_panics_and_is_idempotent(text in ".{0,300}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }
}
