//! CLI module for the Salus gateway
//!
//! # Commands
//!
//! - `serve` - Start the webhook server
//! - `classify` - Run the triage classifier on a message and print the decision
//! - `config` - Configuration utilities (init)
//!
//! # Example
//!
//! ```bash
//! # Start the gateway with default config
//! salus serve
//!
//! # Inspect how a message would be routed
//! salus classify "quero agendar uma consulta" --json
//! ```

pub mod classify;
pub mod config;
pub mod serve;

pub use classify::handle_classify;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Salus - WhatsApp triage gateway for medical clinics
#[derive(Parser, Debug)]
#[command(
    name = "salus",
    version,
    about = "WhatsApp conversational gateway with rule-based clinical triage"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the webhook server
    Serve(ServeArgs),
    /// Classify a message and print the routing decision
    Classify(ClassifyArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "salus.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "SALUS_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "SALUS_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SALUS_LOG_LEVEL")]
    pub log_level: Option<String>,
}

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Message text to classify
    pub text: String,

    /// Output the full decision as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a commented default configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Destination path for the config file
    #[arg(short, long, default_value = "salus.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}
