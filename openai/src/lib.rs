#![deny(missing_docs)]
//! OpenAI-compatible chat-completions backend for the docfields extraction
//! agent.
//!
//! Implements [`docfields_agent::ModelClient`] over HTTP so the workflow
//! controller can run against the OpenAI API or any compatible endpoint.

/// The HTTP client.
pub mod client;
mod types;

pub use client::{OpenAiClient, DEFAULT_BASE_URL};
