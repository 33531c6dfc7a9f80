//! Live extraction against an OpenAI-compatible endpoint.
//!
//! Requires `OPENAI_API_KEY` (and optionally `OPENAI_BASE_URL`, `OPENAI_MODEL`).
//! Run with: `cargo run --example extract_invoice -p docfields-openai`

use std::sync::Arc;

use docfields_agent::{AgentConfig, ExtractionAgent};
use docfields_openai::OpenAiClient;
use serde_json::json;

const DOCUMENT: &str = "\
--- Page 1 ---
INVOICE

Invoice Number: INV-2024-0042
Date: March 15, 2024

Bill To: Initech LLC
123 Main Street

Description          Qty   Price
Widget assembly       10   45.00
Shipping                    25.00

Total Due: $475.00
";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let client = Arc::new(OpenAiClient::from_env()?);
    let config = AgentConfig::default()
        .with_model(std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()));
    let agent = ExtractionAgent::with_config(client, config);

    let schema = json!({
        "properties": {
            "invoice_number": {"type": "string", "description": "The invoice identifier"},
            "invoice_date": {"type": "string", "description": "Date the invoice was issued"},
            "total_amount": {"type": "number", "description": "Grand total due"}
        },
        "required": ["invoice_number", "total_amount"]
    });

    let session_id = uuid::Uuid::new_v4().to_string();
    let outcome = agent.extract(DOCUMENT, &schema, &session_id, None).await?;

    println!("{}", serde_json::to_string_pretty(&outcome)?);
    if outcome.needs_feedback {
        println!("extraction needs review; re-run with feedback to refine it");
    }

    Ok(())
}
