//! Verdict logic for extraction attempts.

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Minimum confidence a required field needs to pass review.
///
/// The bound is inclusive: a score of exactly 0.7 is acceptable.
pub const CONFIDENCE_THRESHOLD: f64 = 0.7;

/// Binary classification of one extraction attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// All required fields present with acceptable confidence.
    Validated,
    /// At least one required field is missing or under-confidence.
    NeedsReview,
}

/// Verdict plus a human-readable explanation.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    /// The classification.
    pub verdict: Verdict,
    /// Explanation suitable for the session message log.
    pub notes: String,
}

/// Checks extracted data against the schema's `required` list.
///
/// A required field is *missing* when absent from `extracted_data` or set to
/// JSON null, and *low-confidence* when a recorded score falls below
/// [`CONFIDENCE_THRESHOLD`]. Fields outside `required` are never checked, and
/// a field with no recorded score is not flagged. The notes enumerate missing
/// fields before low-confidence ones, in schema order.
#[must_use]
pub fn validate_extraction(
    schema: &Value,
    extracted_data: &Map<String, Value>,
    confidence_scores: &HashMap<String, f64>,
) -> ValidationReport {
    let required = schema
        .get("required")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    let mut missing_fields: Vec<&str> = Vec::new();
    let mut low_confidence_fields: Vec<&str> = Vec::new();

    for field in required.iter().filter_map(Value::as_str) {
        match extracted_data.get(field) {
            None | Some(Value::Null) => missing_fields.push(field),
            Some(_) => {
                if let Some(score) = confidence_scores.get(field) {
                    if *score < CONFIDENCE_THRESHOLD {
                        low_confidence_fields.push(field);
                    }
                }
            }
        }
    }

    if missing_fields.is_empty() && low_confidence_fields.is_empty() {
        return ValidationReport {
            verdict: Verdict::Validated,
            notes: "All required fields extracted with good confidence.".to_string(),
        };
    }

    let mut notes = Vec::new();
    if !missing_fields.is_empty() {
        notes.push(format!(
            "Missing required fields: {}",
            missing_fields.join(", ")
        ));
    }
    if !low_confidence_fields.is_empty() {
        notes.push(format!(
            "Low confidence fields: {}",
            low_confidence_fields.join(", ")
        ));
    }

    ValidationReport {
        verdict: Verdict::NeedsReview,
        notes: notes.join("; "),
    }
}
