//! The extraction workflow controller.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::AgentConfig;
use crate::error::AgentError;
use crate::model::{ModelClient, ModelError};
use crate::prompt::{build_extraction_prompt, SYSTEM_PROMPT};
use crate::response::parse_model_response;
use crate::sessions::SessionStore;
use crate::state::{ExtractionState, Message, SessionStatus};
use crate::validation::{validate_extraction, Verdict};

/// Summary of one completed `extract` call, shaped for the API collaborator.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    /// The session this outcome belongs to.
    pub session_id: String,
    /// Terminal status of the attempt.
    pub status: SessionStatus,
    /// Extracted field values from the attempt.
    pub extracted_data: Map<String, Value>,
    /// Per-field confidence scores from the attempt.
    pub confidence_scores: HashMap<String, f64>,
    /// Completed attempt count for the session.
    pub iteration: u32,
    /// Whether the caller should gather human feedback and re-run.
    pub needs_feedback: bool,
}

/// Schema-guided extraction agent with human-in-the-loop feedback.
///
/// Each [`extract`](Self::extract) call runs one full attempt — prompt build,
/// model call, parse, validate — and replaces the session's stored state.
/// Feedback supplied for an existing session re-enters the loop with the
/// original document and schema; the feedback only changes the next prompt.
pub struct ExtractionAgent {
    client: Arc<dyn ModelClient>,
    sessions: SessionStore,
    config: AgentConfig,
}

impl ExtractionAgent {
    /// Creates an agent with default configuration and a fresh session store.
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self::with_config(client, AgentConfig::default())
    }

    /// Creates an agent with the given configuration.
    pub fn with_config(client: Arc<dyn ModelClient>, config: AgentConfig) -> Self {
        Self {
            client,
            sessions: SessionStore::new(),
            config,
        }
    }

    /// Creates an agent over an externally owned session store.
    ///
    /// Lets a service share one store across agents or tear sessions down
    /// independently of the agent's lifetime.
    pub fn with_sessions(
        client: Arc<dyn ModelClient>,
        sessions: SessionStore,
        config: AgentConfig,
    ) -> Self {
        Self {
            client,
            sessions,
            config,
        }
    }

    /// Handle to the underlying session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Runs one extraction attempt for `session_id`.
    ///
    /// Non-empty `feedback` for a known session re-runs the session's original
    /// document and schema with the feedback folded into the prompt; otherwise
    /// a fresh session is built from the supplied inputs. The resulting state
    /// always overwrites the stored one, except when the model invocation
    /// itself fails — that propagates as [`AgentError::Model`] with nothing
    /// persisted. A reply that fails to parse is *not* an error here: it
    /// yields a well-formed outcome with status
    /// [`SessionStatus::Error`](crate::SessionStatus).
    pub async fn extract(
        &self,
        document_text: &str,
        json_schema: &Value,
        session_id: &str,
        feedback: Option<&str>,
    ) -> Result<ExtractionOutcome, AgentError> {
        let prior = self.sessions.get(session_id).await;
        let has_feedback = feedback.is_some_and(|f| !f.is_empty());

        let mut state = match (has_feedback, prior) {
            (true, Some(prev)) => {
                tracing::info!(session_id, iteration = prev.iteration, "reprocessing with feedback");
                let mut state = prev;
                state.human_feedback = feedback.map(str::to_string);
                state.status = SessionStatus::Reprocessing;
                state
            }
            _ => {
                tracing::info!(session_id, "starting extraction session");
                ExtractionState::new(
                    document_text,
                    json_schema.clone(),
                    feedback.map(str::to_string),
                    self.config.max_iterations,
                )
            }
        };

        let raw = self.invoke_model(&state).await?;

        match parse_model_response(&raw) {
            Ok(payload) => {
                let mut extracted = payload.extracted_data.unwrap_or_default();
                let mut scores = payload.confidence_scores.unwrap_or_default();

                // Result keys are drawn only from the schema's properties.
                if let Some(allowed) = property_names(&state.json_schema) {
                    extracted.retain(|key, _| allowed.contains(key.as_str()));
                    scores.retain(|key, _| allowed.contains(key.as_str()));
                }

                state.extracted_data = extracted;
                state.confidence_scores = scores;
                state.iteration += 1;
                state.status = SessionStatus::Extracted;
                state.messages.push(Message::assistant(format!(
                    "Extraction completed. Notes: {}",
                    payload.extraction_notes.as_deref().unwrap_or("None")
                )));
            }
            Err(e) => {
                tracing::warn!(session_id, error = %e, "model reply was not parseable JSON");
                state.extracted_data = Map::new();
                state.confidence_scores = HashMap::new();
                state.iteration += 1;
                state.status = SessionStatus::Error;
                state.messages.push(Message::assistant(format!(
                    "Error parsing extraction result: {}",
                    e.message
                )));
            }
        }

        if state.status == SessionStatus::Extracted {
            let report = validate_extraction(
                &state.json_schema,
                &state.extracted_data,
                &state.confidence_scores,
            );
            match report.verdict {
                Verdict::Validated => {
                    state.status = SessionStatus::Validated;
                    state.messages.push(Message::assistant(report.notes));
                }
                Verdict::NeedsReview => {
                    state.status = SessionStatus::NeedsReview;
                    state
                        .messages
                        .push(Message::assistant(format!("Validation: {}", report.notes)));
                }
            }
        }

        self.sessions.put(session_id, state.clone()).await;

        tracing::info!(
            session_id,
            status = ?state.status,
            iteration = state.iteration,
            "extraction attempt finished"
        );

        Ok(ExtractionOutcome {
            session_id: session_id.to_string(),
            status: state.status,
            extracted_data: state.extracted_data,
            confidence_scores: state.confidence_scores,
            iteration: state.iteration,
            needs_feedback: state.status == SessionStatus::NeedsReview,
        })
    }

    /// Returns the stored state for `session_id`, if any.
    pub async fn get_session(&self, session_id: &str) -> Option<ExtractionState> {
        self.sessions.get(session_id).await
    }

    /// Deletes the stored state for `session_id`. Returns `true` if it existed.
    pub async fn delete_session(&self, session_id: &str) -> bool {
        self.sessions.delete(session_id).await
    }

    /// Builds the prompt for the working state and performs the model call,
    /// bounded by the configured deadline.
    async fn invoke_model(&self, state: &ExtractionState) -> Result<String, ModelError> {
        let feedback = state
            .human_feedback
            .as_deref()
            .filter(|f| !f.is_empty());
        let prompt = build_extraction_prompt(&state.document_text, &state.json_schema, feedback);
        let messages = [Message::system(SYSTEM_PROMPT), Message::human(prompt)];

        tracing::debug!(
            prompt_chars = messages[1].content.chars().count(),
            model = %self.config.model,
            "invoking model"
        );

        tokio::time::timeout(
            self.config.request_timeout,
            self.client
                .generate(&messages, self.config.temperature, &self.config.model),
        )
        .await
        .map_err(|_| ModelError::Timeout(self.config.request_timeout))?
    }
}

/// Key set of the schema's `properties` mapping, when present.
fn property_names(schema: &Value) -> Option<HashSet<&str>> {
    schema
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| properties.keys().map(String::as_str).collect())
}
