//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{LogFormat, LoggingConfig, SalusConfig};
use crate::delivery::WhatsAppClient;
use crate::dispatch::OpenRouterAgent;
use crate::pipeline::MessagePipeline;
use crate::transcription::{Transcriber, WhisperTranscriber};
use crate::triage::{EscalationGate, TriageRouter};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &ServeArgs) -> Result<SalusConfig> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if args.config.exists() {
        SalusConfig::load(Some(&args.config))?
    } else {
        tracing::debug!("Config file not found, using defaults");
        SalusConfig::default()
    };

    // Apply environment variable overrides
    config = config.with_env_overrides();

    // Apply CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    if config.log_message_content {
        eprintln!("WARNING: Message content logging is enabled. Patient messages will be logged.");
        eprintln!("         Use only for debugging.");
    }

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}

/// Run the webhook server until shutdown.
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = load_config_with_overrides(&args)?;
    init_tracing(&config.logging)?;

    let config = Arc::new(config);

    let agent = OpenRouterAgent::from_config(&config.agent)
        .context("failed to configure reply agent")?;
    let whatsapp = WhatsAppClient::from_config(&config.whatsapp)
        .context("failed to configure WhatsApp client")?;

    let pipeline = Arc::new(MessagePipeline::new(
        TriageRouter::with_defaults(),
        EscalationGate::default(),
        Arc::new(agent),
        Arc::new(whatsapp),
    ));

    let transcriber: Option<Arc<dyn Transcriber>> = if config.transcription.enabled {
        let whisper = WhisperTranscriber::from_config(&config.transcription)
            .context("failed to configure transcriber")?;
        Some(Arc::new(whisper))
    } else {
        tracing::info!("voice-note transcription disabled");
        None
    };

    let state = Arc::new(AppState::new(pipeline, transcriber, Arc::clone(&config)));
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        addr = %addr,
        model = %config.agent.model,
        "Salus gateway listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn cli_overrides_take_precedence() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("salus.toml");
        std::fs::write(&path, "[server]\nport = 9000").unwrap();

        let args = ServeArgs {
            config: path,
            port: Some(7777),
            host: Some("127.0.0.1".to_string()),
            log_level: Some("debug".to_string()),
        };
        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.server.port, 7777);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn missing_config_file_uses_defaults() {
        let args = ServeArgs {
            config: PathBuf::from("/nonexistent/salus.toml"),
            port: None,
            host: None,
            log_level: None,
        };
        let config = load_config_with_overrides(&args).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn invalid_override_fails_validation() {
        let args = ServeArgs {
            config: PathBuf::from("/nonexistent/salus.toml"),
            port: Some(0),
            host: None,
            log_level: None,
        };
        assert!(load_config_with_overrides(&args).is_err());
    }
}
