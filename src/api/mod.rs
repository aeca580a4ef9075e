//! # Webhook HTTP surface
//!
//! HTTP endpoints for the gateway:
//!
//! - `POST /webhook/whatsapp` - inbound message webhook; acknowledges with
//!   the routing summary and processes the reply in the background
//! - `GET /health` - gateway health, version and uptime
//!
//! # Example
//!
//! ```no_run
//! use salus::api::{create_router, AppState};
//! use salus::config::SalusConfig;
//! use salus::delivery::WhatsAppClient;
//! use salus::dispatch::OpenRouterAgent;
//! use salus::pipeline::MessagePipeline;
//! use salus::transcription::{Transcriber, WhisperTranscriber};
//! use salus::triage::{EscalationGate, TriageRouter};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(SalusConfig::default());
//! let pipeline = Arc::new(MessagePipeline::new(
//!     TriageRouter::with_defaults(),
//!     EscalationGate::default(),
//!     Arc::new(OpenRouterAgent::from_config(&config.agent)?),
//!     Arc::new(WhatsAppClient::from_config(&config.whatsapp)?),
//! ));
//! let transcriber: Arc<dyn Transcriber> =
//!     Arc::new(WhisperTranscriber::from_config(&config.transcription)?);
//!
//! let state = Arc::new(AppState::new(pipeline, Some(transcriber), config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

mod health;
pub mod types;
mod webhook;

pub use types::{WebhookMessage, WebhookResponse};

use crate::config::SalusConfig;
use crate::pipeline::MessagePipeline;
use crate::transcription::Transcriber;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (1 MB). WhatsApp text payloads are tiny.
const MAX_BODY_SIZE: usize = 1024 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub pipeline: Arc<MessagePipeline>,
    /// Voice-note transcriber; `None` when transcription is disabled.
    pub transcriber: Option<Arc<dyn Transcriber>>,
    pub config: Arc<SalusConfig>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        pipeline: Arc<MessagePipeline>,
        transcriber: Option<Arc<dyn Transcriber>>,
        config: Arc<SalusConfig>,
    ) -> Self {
        Self {
            pipeline,
            transcriber,
            config,
            start_time: Instant::now(),
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    Router::new()
        .route("/webhook/whatsapp", post(webhook::handle))
        .route("/health", get(health::handle))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
