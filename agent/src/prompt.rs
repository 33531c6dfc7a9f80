//! Prompt construction for schema-guided extraction.

use serde_json::Value;

/// Fixed system message sent with every extraction prompt.
pub const SYSTEM_PROMPT: &str =
    "You are a precise document extraction agent. Always respond with valid JSON.";

/// Builds the extraction prompt for one attempt.
///
/// Pure and deterministic: embeds the schema as pretty-printed JSON, the full
/// document text verbatim (no truncation), an optional feedback block, and the
/// output-format directive requiring exactly the `extracted_data`,
/// `confidence_scores`, and `extraction_notes` top-level keys.
#[must_use]
pub fn build_extraction_prompt(
    document_text: &str,
    schema: &Value,
    feedback: Option<&str>,
) -> String {
    let schema_str =
        serde_json::to_string_pretty(schema).unwrap_or_else(|_| schema.to_string());

    let mut prompt = format!(
        "You are an expert document data extraction agent. Extract the required fields \
from the document according to the provided JSON schema.

## JSON Schema (defines required fields):
```json
{schema_str}
```

## Document Content:
```
{document_text}
```

## Instructions:
1. Extract ALL fields defined in the schema from the document
2. For each field, provide:
   - The extracted value (or null if not found)
   - A confidence score (0.0 to 1.0)
3. Be precise and extract exact values as they appear in the document
4. If a field has multiple possible values, choose the most relevant one
"
    );

    if let Some(feedback) = feedback {
        prompt.push_str(&format!(
            "
## Human Feedback (incorporate this in your extraction):
{feedback}

Please re-extract the data considering the feedback above. Make corrections as indicated.
"
        ));
    }

    prompt.push_str(
        "
## Output Format:
Respond with a valid JSON object containing:
{
  \"extracted_data\": {
    // field_name: extracted_value pairs matching the schema
  },
  \"confidence_scores\": {
    // field_name: confidence_score (0.0-1.0) pairs
  },
  \"extraction_notes\": \"Brief notes about the extraction, any uncertainties or issues\"
}
",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invoice_schema() -> Value {
        json!({
            "properties": {
                "invoice_number": {"type": "string", "description": "Invoice id"},
                "total_amount": {"type": "number"}
            },
            "required": ["invoice_number", "total_amount"]
        })
    }

    #[test]
    fn test_prompt_embeds_schema_and_document() {
        let prompt = build_extraction_prompt("INVOICE INV-1 total 100", &invoice_schema(), None);

        assert!(prompt.contains("\"invoice_number\""));
        assert!(prompt.contains("INVOICE INV-1 total 100"));
        assert!(prompt.contains("## Output Format:"));
        assert!(prompt.contains("\"extracted_data\""));
        assert!(prompt.contains("\"confidence_scores\""));
        assert!(prompt.contains("\"extraction_notes\""));
    }

    #[test]
    fn test_prompt_without_feedback_has_no_feedback_block() {
        let prompt = build_extraction_prompt("doc", &invoice_schema(), None);
        assert!(!prompt.contains("## Human Feedback"));
    }

    #[test]
    fn test_prompt_with_feedback_appends_block() {
        let prompt =
            build_extraction_prompt("doc", &invoice_schema(), Some("fix the date format"));

        assert!(prompt.contains("## Human Feedback"));
        assert!(prompt.contains("fix the date format"));
        assert!(prompt.contains("Please re-extract the data"));
        // Output directive still follows the feedback block.
        let feedback_pos = prompt.find("## Human Feedback").unwrap();
        let output_pos = prompt.find("## Output Format:").unwrap();
        assert!(feedback_pos < output_pos);
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let a = build_extraction_prompt("doc", &invoice_schema(), Some("fb"));
        let b = build_extraction_prompt("doc", &invoice_schema(), Some("fb"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_large_document_passed_through_in_full() {
        let doc = "x".repeat(200_000);
        let prompt = build_extraction_prompt(&doc, &invoice_schema(), None);
        assert!(prompt.contains(&doc));
    }
}
