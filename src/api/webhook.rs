//! WhatsApp webhook endpoint handler.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use std::sync::Arc;

use crate::api::types::{WebhookMessage, WebhookResponse};
use crate::api::AppState;
use crate::logging::{generate_request_id, truncate_content};
use crate::pipeline::InboundMessage;
use crate::transcription::Transcriber;

/// POST /webhook/whatsapp - Receive an inbound message.
///
/// Voice notes are transcribed first so audio goes through the same triage
/// as text. Classifies synchronously and acknowledges immediately with the
/// routing summary; reply generation and delivery run as a background task
/// so the provider's webhook never waits on the LLM.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    Json(message): Json<WebhookMessage>,
) -> Result<Json<WebhookResponse>, (StatusCode, String)> {
    let request_id = generate_request_id();

    let phone = message
        .sender()
        .map(str::to_string)
        .ok_or((StatusCode::BAD_REQUEST, "missing sender phone".to_string()))?;

    if state.config.logging.log_message_content {
        tracing::debug!(
            request_id = %request_id,
            phone = %phone,
            content = %truncate_content(&message.body, 100),
            "webhook message content"
        );
    }
    tracing::info!(
        request_id = %request_id,
        phone = %phone,
        message_id = message.id.as_deref().unwrap_or("unknown"),
        message_type = %message.message_type,
        message_length = message.body.len(),
        "webhook received"
    );

    let text = resolve_message_text(&state, &message, &request_id).await;

    let decision = state.pipeline.classify(&text);

    let inbound = InboundMessage {
        phone,
        text,
        message_id: message.id,
        contact_name: message.push_name,
    };

    let response = WebhookResponse {
        status: "accepted".to_string(),
        request_id,
        workflow: decision.workflow,
        confidence: decision.confidence,
        escalate_immediately: decision.escalate_immediately,
        timestamp: Utc::now(),
    };

    let pipeline = Arc::clone(&state.pipeline);
    tokio::spawn(async move {
        pipeline.handle(inbound, decision).await;
    });

    Ok(Json(response))
}

/// Text to run through triage: the body as-is, or the voice-note
/// transcript when the message is audio and a transcriber is configured.
async fn resolve_message_text(
    state: &AppState,
    message: &WebhookMessage,
    request_id: &str,
) -> String {
    if message.message_type != "audio" {
        return message.body.clone();
    }

    let (transcriber, media_url) = match (&state.transcriber, &message.media_url) {
        (Some(transcriber), Some(url)) => (transcriber, url),
        (None, Some(_)) => {
            tracing::warn!(
                request_id = %request_id,
                "voice note received but transcription is disabled"
            );
            return message.body.clone();
        }
        _ => return message.body.clone(),
    };

    match transcriber.transcribe_url(media_url).await {
        Ok(transcript) => {
            tracing::info!(
                request_id = %request_id,
                transcriber = transcriber.name(),
                transcript_length = transcript.len(),
                "voice note transcribed"
            );
            format!("[Áudio transcrito]: {transcript}")
        }
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                error = %e,
                "voice note transcription failed"
            );
            "[Áudio recebido - não foi possível transcrever]".to_string()
        }
    }
}
