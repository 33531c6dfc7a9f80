#![deny(missing_docs)]
//! Schema-guided document field extraction with human-in-the-loop feedback.
//!
//! The crate's center is [`ExtractionAgent`]: a small workflow controller that
//! builds a schema-guided prompt, invokes a text-generation model through the
//! [`ModelClient`] seam, parses the (possibly markdown-fenced) JSON reply,
//! validates it against the schema's required fields, and stores the
//! per-session state so callers can iteratively refine results with feedback.

/// Workflow controller and call outcome types.
pub mod agent;
/// Agent configuration.
pub mod config;
/// Controller-level errors.
pub mod error;
/// Model client trait and invocation errors.
pub mod model;
/// Prompt construction.
pub mod prompt;
/// Model reply parsing.
pub mod response;
/// Session state storage.
pub mod sessions;
/// Session state and message log types.
pub mod state;
/// Required-field and confidence validation.
pub mod validation;

pub use agent::{ExtractionAgent, ExtractionOutcome};
pub use config::AgentConfig;
pub use error::AgentError;
pub use model::{ModelClient, ModelError};
pub use prompt::{build_extraction_prompt, SYSTEM_PROMPT};
pub use response::{parse_model_response, MalformedResponse, ModelPayload};
pub use sessions::SessionStore;
pub use state::{ExtractionState, Message, Role, SessionStatus};
pub use validation::{validate_extraction, ValidationReport, Verdict, CONFIDENCE_THRESHOLD};
