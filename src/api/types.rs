//! Webhook payload types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::triage::Workflow;

/// Inbound WhatsApp webhook payload (Evolution-API style).
///
/// Providers are inconsistent about the sender field; both `from` and
/// `phone` are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookMessage {
    /// Message text content.
    #[serde(default)]
    pub body: String,
    /// Sender phone number.
    pub from: Option<String>,
    /// Alternate sender field some providers use.
    pub phone: Option<String>,
    /// Provider message id.
    pub id: Option<String>,
    /// Provider timestamp (opaque, logged as-is).
    pub timestamp: Option<String>,
    /// Message type ("text", "audio", ...). Audio triggers transcription.
    #[serde(rename = "messageType", default = "default_message_type")]
    pub message_type: String,
    /// Media URL for audio payloads. Providers vary between camelCase and
    /// snake_case.
    #[serde(rename = "mediaUrl", alias = "media_url")]
    pub media_url: Option<String>,
    /// WhatsApp display name of the sender.
    #[serde(rename = "pushName")]
    pub push_name: Option<String>,
}

fn default_message_type() -> String {
    "text".to_string()
}

impl WebhookMessage {
    /// Sender phone, whichever field the provider populated.
    pub fn sender(&self) -> Option<&str> {
        self.from.as_deref().or(self.phone.as_deref())
    }
}

/// Immediate webhook acknowledgment with the routing summary.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookResponse {
    pub status: String,
    pub request_id: String,
    pub workflow: Workflow,
    pub confidence: f64,
    pub escalate_immediately: bool,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn webhook_message_parses_minimal_payload() {
        let msg: WebhookMessage =
            serde_json::from_str(r#"{"body":"oi","from":"5511999990000"}"#).unwrap();
        assert_eq!(msg.body, "oi");
        assert_eq!(msg.sender(), Some("5511999990000"));
        assert_eq!(msg.message_type, "text");
    }

    #[test]
    fn webhook_message_accepts_phone_field() {
        let msg: WebhookMessage =
            serde_json::from_str(r#"{"body":"oi","phone":"5511988887777"}"#).unwrap();
        assert_eq!(msg.sender(), Some("5511988887777"));
    }

    #[test]
    fn webhook_message_from_takes_precedence() {
        let msg: WebhookMessage = serde_json::from_str(
            r#"{"body":"oi","from":"111","phone":"222"}"#,
        )
        .unwrap();
        assert_eq!(msg.sender(), Some("111"));
    }

    #[test]
    fn webhook_message_tolerates_missing_body() {
        let msg: WebhookMessage = serde_json::from_str(r#"{"from":"111"}"#).unwrap();
        assert_eq!(msg.body, "");
    }

    #[test]
    fn webhook_message_reads_media_url_both_spellings() {
        let msg: WebhookMessage = serde_json::from_str(
            r#"{"from":"111","messageType":"audio","mediaUrl":"https://cdn.example/a.ogg"}"#,
        )
        .unwrap();
        assert_eq!(msg.media_url.as_deref(), Some("https://cdn.example/a.ogg"));

        let msg: WebhookMessage = serde_json::from_str(
            r#"{"from":"111","messageType":"audio","media_url":"https://cdn.example/a.ogg"}"#,
        )
        .unwrap();
        assert_eq!(msg.media_url.as_deref(), Some("https://cdn.example/a.ogg"));
    }

    #[test]
    fn webhook_message_reads_push_name() {
        let msg: WebhookMessage = serde_json::from_str(
            r#"{"body":"oi","from":"111","pushName":"Maria","messageType":"audio"}"#,
        )
        .unwrap();
        assert_eq!(msg.push_name.as_deref(), Some("Maria"));
        assert_eq!(msg.message_type, "audio");
    }
}
