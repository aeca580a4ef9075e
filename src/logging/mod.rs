//! Structured logging helpers.
//!
//! Builds tracing filter directives from the logging configuration and
//! provides small utilities for log fields (request ids, content
//! truncation for the opt-in message-content logging).

use crate::config::LoggingConfig;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig,
/// in the format: "base_level,salus::component1=level1,...".
pub fn build_filter_directives(config: &LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        for (component, level) in component_levels {
            filter_str.push_str(&format!(",salus::{component}={level}"));
        }
    }

    filter_str
}

/// Generate a unique request id for webhook correlation.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Truncate message content for logging previews.
///
/// Keeps the first `max_chars` characters (on a char boundary) and marks
/// the cut with an ellipsis.
pub fn truncate_content(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn filter_directives_base_level_only() {
        let config = LoggingConfig {
            level: "info".to_string(),
            ..Default::default()
        };
        assert_eq!(build_filter_directives(&config), "info");
    }

    #[test]
    fn filter_directives_with_component_levels() {
        let mut component_levels = HashMap::new();
        component_levels.insert("triage".to_string(), "debug".to_string());

        let config = LoggingConfig {
            level: "info".to_string(),
            component_levels: Some(component_levels),
            ..Default::default()
        };
        assert_eq!(build_filter_directives(&config), "info,salus::triage=debug");
    }

    #[test]
    fn request_ids_are_unique() {
        assert_ne!(generate_request_id(), generate_request_id());
    }

    #[test]
    fn truncate_content_short_text_unchanged() {
        assert_eq!(truncate_content("oi", 50), "oi");
    }

    #[test]
    fn truncate_content_long_text_cut() {
        let text = "a".repeat(100);
        let truncated = truncate_content(&text, 50);
        assert_eq!(truncated.len(), 53);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncate_content_respects_char_boundaries() {
        let text = "ação".repeat(20);
        let truncated = truncate_content(&text, 10);
        assert!(truncated.ends_with("..."));
    }
}
