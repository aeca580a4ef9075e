//! Scheduling sub-workflow resolution.

use crate::triage::decision::Workflow;
use crate::triage::tables::TriageTables;

/// Pick the specific scheduling workflow for a message already classified
/// into the scheduling category.
///
/// First match wins, top to bottom: confirmation, reschedule/cancel,
/// booking, then the general scheduling fallback. The ordering matters: a
/// message carrying both a booking word and a confirmation word is
/// confirming an existing booking and must not re-enter the booking flow.
pub fn resolve_scheduling_workflow(tables: &TriageTables, normalized_text: &str) -> Workflow {
    let contains_any =
        |cues: &[&str]| cues.iter().any(|cue| normalized_text.contains(cue));

    if contains_any(&tables.confirmation_cues) {
        Workflow::AppointmentConfirmation
    } else if contains_any(&tables.reschedule_cues) {
        Workflow::AppointmentRescheduling
    } else if contains_any(&tables.booking_cues) {
        Workflow::AppointmentBooking
    } else {
        Workflow::AppointmentGeneral
    }
}
