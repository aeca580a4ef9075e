//! Classify command implementation
//!
//! Operator debugging aid: run a message through the production triage
//! tables and show where it would be routed, without touching any
//! collaborator.

use crate::cli::ClassifyArgs;
use crate::triage::TriageRouter;
use anyhow::Result;

pub fn handle_classify(args: &ClassifyArgs) -> Result<String> {
    let router = TriageRouter::with_defaults();
    let decision = router.classify(&args.text);

    if args.json {
        return Ok(serde_json::to_string_pretty(&decision)?);
    }

    let mut out = String::new();
    out.push_str(&format!("workflow:    {}\n", decision.workflow.as_str()));
    out.push_str(&format!("confidence:  {:.2}\n", decision.confidence));
    out.push_str(&format!("priority:    {:?}\n", decision.priority));
    out.push_str(&format!("escalate:    {}\n", decision.escalate_immediately));
    out.push_str(&format!("reason:      {}\n", decision.reason));
    out.push_str(&format!(
        "patterns:    {}",
        if decision.matched_patterns.is_empty() {
            "(none)".to_string()
        } else {
            decision.matched_patterns.join(", ")
        }
    ));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_text_output_contains_workflow() {
        let args = ClassifyArgs {
            text: "quero agendar uma consulta".to_string(),
            json: false,
        };
        let output = handle_classify(&args).unwrap();
        assert!(output.contains("appointment_booking"));
        assert!(output.contains("confidence"));
    }

    #[test]
    fn classify_json_output_is_valid_json() {
        let args = ClassifyArgs {
            text: "socorro".to_string(),
            json: true,
        };
        let output = handle_classify(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["workflow"], "emergency_escalation");
    }
}
