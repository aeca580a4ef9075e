//! Salus - WhatsApp triage gateway for medical clinics
//!
//! Receives clinic WhatsApp messages over a webhook, transcribes voice
//! notes, classifies intent with a deterministic rule-based triage core
//! (emergency, scheduling, general medical), generates replies through an
//! LLM agent, applies a safety escalation gate, and delivers answers back
//! over WhatsApp.

pub mod api;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod dispatch;
pub mod logging;
pub mod pipeline;
pub mod transcription;
pub mod triage;
