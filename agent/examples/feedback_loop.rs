//! Offline walkthrough of the extraction feedback loop using a scripted model.
//!
//! Run with: `cargo run --example feedback_loop -p docfields-agent`

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use docfields_agent::{ExtractionAgent, Message, ModelClient, ModelError};
use serde_json::json;
use tokio::sync::Mutex;

/// Replays canned replies, standing in for a live model.
struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn generate(
        &self,
        _messages: &[Message],
        _temperature: f32,
        _model: &str,
    ) -> Result<String, ModelError> {
        self.replies
            .lock()
            .await
            .pop_front()
            .ok_or_else(|| ModelError::Transport("script exhausted".to_string()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // First reply misses the date; second (after feedback) fills it in.
    let first = json!({
        "extracted_data": {"invoice_number": "INV-2024-001", "invoice_date": null},
        "confidence_scores": {"invoice_number": 0.92},
        "extraction_notes": "Date not found near header"
    });
    let second = json!({
        "extracted_data": {"invoice_number": "INV-2024-001", "invoice_date": "2024-03-15"},
        "confidence_scores": {"invoice_number": 0.92, "invoice_date": 0.88},
        "extraction_notes": "Date located in footer per feedback"
    });

    let model = Arc::new(ScriptedModel {
        replies: Mutex::new(VecDeque::from([first.to_string(), second.to_string()])),
    });
    let agent = ExtractionAgent::new(model);

    let schema = json!({
        "properties": {
            "invoice_number": {"type": "string", "description": "Invoice identifier"},
            "invoice_date": {"type": "string", "description": "Issue date"}
        },
        "required": ["invoice_number", "invoice_date"]
    });
    let document = "INVOICE INV-2024-001\nAcme Corp\n...\nIssued: 2024-03-15";
    let session_id = uuid::Uuid::new_v4().to_string();

    let outcome = agent.extract(document, &schema, &session_id, None).await?;
    println!("round 1: {}", serde_json::to_string_pretty(&outcome)?);

    if outcome.needs_feedback {
        let outcome = agent
            .extract(
                document,
                &schema,
                &session_id,
                Some("the issue date is in the footer, format it as YYYY-MM-DD"),
            )
            .await?;
        println!("round 2: {}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
