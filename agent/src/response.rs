//! Parsing of raw model replies into structured extraction payloads.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Structured payload the model is asked to produce.
///
/// All keys are optional on the wire; consumers treat absent (or null) maps as
/// empty via [`Option::unwrap_or_default`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelPayload {
    /// Field name to extracted value pairs.
    #[serde(default)]
    pub extracted_data: Option<Map<String, Value>>,
    /// Field name to confidence score pairs.
    #[serde(default)]
    pub confidence_scores: Option<HashMap<String, f64>>,
    /// Free-form notes about the extraction.
    #[serde(default)]
    pub extraction_notes: Option<String>,
}

/// Raw model output was not valid JSON after fence-stripping.
///
/// This is a recoverable outcome for the workflow controller, which converts
/// it into the session's `error` status rather than propagating it.
#[derive(Debug, Clone, Error)]
#[error("could not parse model response as JSON: {message}")]
pub struct MalformedResponse {
    /// Underlying JSON parse error text.
    pub message: String,
    /// The raw model output that failed to parse.
    pub raw_text: String,
}

/// Returns the candidate JSON slice of a raw model reply.
///
/// Prefers the content of the first ` ```json ` fence pair; falls back to the
/// first generic ` ``` ` pair; otherwise the text as-is. An unclosed fence
/// keeps everything after the opening marker.
fn strip_fences(raw: &str) -> &str {
    if let Some(start) = raw.find("```json") {
        let body = &raw[start + "```json".len()..];
        match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        }
    } else if let Some(start) = raw.find("```") {
        let body = &raw[start + "```".len()..];
        match body.find("```") {
            Some(end) => &body[..end],
            None => body,
        }
    } else {
        raw
    }
}

/// Parses a raw model reply into a [`ModelPayload`].
///
/// Tolerates markdown fencing around the JSON object but nothing else: if the
/// stripped content is not valid JSON the result is a [`MalformedResponse`].
pub fn parse_model_response(raw: &str) -> Result<ModelPayload, MalformedResponse> {
    let content = strip_fences(raw).trim();

    serde_json::from_str(content).map_err(|e| MalformedResponse {
        message: e.to_string(),
        raw_text: raw.to_string(),
    })
}
