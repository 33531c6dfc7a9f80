//! Per-session workflow state and message log types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Status of an extraction session after its most recent attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Session created, no attempt has completed yet.
    Started,
    /// Model output was parsed successfully; validation pending.
    Extracted,
    /// Model output could not be parsed as JSON.
    Error,
    /// All required fields present with acceptable confidence.
    Validated,
    /// One or more required fields missing or under-confidence.
    NeedsReview,
    /// A feedback re-run has been requested for this session.
    Reprocessing,
}

/// Author of a message in the session log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Fixed instruction framing the model's behavior.
    System,
    /// Caller-supplied content (the extraction prompt, feedback).
    Human,
    /// Model-side or controller-side commentary.
    Assistant,
}

/// One entry in a session's append-only message log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who authored the message.
    pub role: Role,
    /// Message text.
    pub content: String,
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Creates a human message.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: Role::Human,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Full state of one extraction session.
///
/// Created on the first [`extract`](crate::ExtractionAgent::extract) call for a
/// session id and replaced wholesale on every subsequent call. `document_text`
/// and `json_schema` are immutable for the session's lifetime; `messages` only
/// ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionState {
    /// Plain text of the document being extracted from.
    pub document_text: String,
    /// Caller-owned field schema (`properties` + `required`). Never mutated.
    pub json_schema: Value,
    /// Latest extracted field values, keyed by field name.
    pub extracted_data: Map<String, Value>,
    /// Latest per-field confidence scores in `[0.0, 1.0]`.
    pub confidence_scores: HashMap<String, f64>,
    /// Most recent human feedback, if any round supplied it.
    pub human_feedback: Option<String>,
    /// Number of completed attempts. Never decreases.
    pub iteration: u32,
    /// Advisory attempt ceiling. Tracked and reported, not enforced.
    pub max_iterations: u32,
    /// Outcome of the most recent attempt.
    pub status: SessionStatus,
    /// Append-only log of messages across all rounds.
    pub messages: Vec<Message>,
}

impl ExtractionState {
    /// Builds the initial state for a fresh session.
    pub fn new(
        document_text: impl Into<String>,
        json_schema: Value,
        human_feedback: Option<String>,
        max_iterations: u32,
    ) -> Self {
        Self {
            document_text: document_text.into(),
            json_schema,
            extracted_data: Map::new(),
            confidence_scores: HashMap::new(),
            human_feedback,
            iteration: 0,
            max_iterations,
            status: SessionStatus::Started,
            messages: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_serializes_snake_case() {
        let s = serde_json::to_string(&SessionStatus::NeedsReview).unwrap();
        assert_eq!(s, "\"needs_review\"");
        let s = serde_json::to_string(&SessionStatus::Reprocessing).unwrap();
        assert_eq!(s, "\"reprocessing\"");
    }

    #[test]
    fn test_fresh_state_defaults() {
        let state = ExtractionState::new("doc", json!({"properties": {}}), None, 3);
        assert_eq!(state.iteration, 0);
        assert_eq!(state.status, SessionStatus::Started);
        assert!(state.extracted_data.is_empty());
        assert!(state.confidence_scores.is_empty());
        assert!(state.messages.is_empty());
        assert_eq!(state.max_iterations, 3);
    }

    #[test]
    fn test_state_round_trips_through_json() {
        let mut state = ExtractionState::new("doc", json!({"required": ["a"]}), None, 3);
        state.messages.push(Message::assistant("done"));
        state.confidence_scores.insert("a".to_string(), 0.9);

        let encoded = serde_json::to_string(&state).unwrap();
        let decoded: ExtractionState = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.messages, state.messages);
        assert_eq!(decoded.confidence_scores["a"], 0.9);
    }
}
