//! Config init command implementation

use crate::cli::ConfigInitArgs;
use anyhow::{bail, Result};

const CONFIG_TEMPLATE: &str = r#"# Salus gateway configuration
# Secrets are read from environment variables, never from this file.

[server]
host = "0.0.0.0"
port = 8000
request_timeout_seconds = 30

[agent]
# Any OpenAI-compatible chat-completions provider works.
base_url = "https://openrouter.ai/api/v1"
model = "anthropic/claude-3.5-sonnet"
api_key_env = "SALUS_OPENROUTER_API_KEY"
temperature = 0.7
max_tokens = 1024
timeout_seconds = 60

[whatsapp]
# Evolution-API style gateway.
base_url = "http://localhost:8080"
api_key_env = "SALUS_WHATSAPP_API_KEY"
instance = "clinic-main"
timeout_seconds = 30
max_retries = 2
country_code = "55"

[transcription]
# Voice notes are downloaded and transcribed before triage. Disable if no
# OpenAI-compatible transcription provider is available.
enabled = true
base_url = "https://api.openai.com/v1"
model = "whisper-1"
api_key_env = "SALUS_OPENAI_API_KEY"
language = "pt"
timeout_seconds = 60

[logging]
level = "info"
format = "pretty"
# Patient messages are sensitive; content logging is opt-in.
log_message_content = false

# Per-component levels:
# [logging.component_levels]
# triage = "debug"
"#;

pub fn handle_config_init(args: &ConfigInitArgs) -> Result<()> {
    if args.output.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            args.output.display()
        );
    }
    std::fs::write(&args.output, CONFIG_TEMPLATE)?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
