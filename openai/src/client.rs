//! OpenAI-compatible chat-completions client.

use async_trait::async_trait;
use docfields_agent::{Message, ModelClient, ModelError};
use reqwest::StatusCode;

use crate::types::{ChatRequest, ChatResponse, WireMessage};

/// Default API endpoint. Any OpenAI-compatible server works via
/// [`OpenAiClient::with_base_url`] (Ollama, vLLM, proxies).
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Chat-completions client implementing the agent's [`ModelClient`] seam.
///
/// One HTTP call per `generate`; no retries. Timeouts are the controller's
/// responsibility.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Creates a client for the default OpenAI endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client from `OPENAI_API_KEY`, honoring `OPENAI_BASE_URL`
    /// when set.
    pub fn from_env() -> Result<Self, ModelError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::Auth("OPENAI_API_KEY is not set".to_string()))?;

        let mut client = Self::new(api_key);
        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            client.base_url = base_url;
        }
        Ok(client)
    }

    /// Points the client at a different OpenAI-compatible endpoint.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ModelClient for OpenAiClient {
    async fn generate(
        &self,
        messages: &[Message],
        temperature: f32,
        model: &str,
    ) -> Result<String, ModelError> {
        let request = ChatRequest {
            model,
            temperature,
            messages: messages.iter().map(WireMessage::from).collect(),
        };

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        tracing::debug!(%url, model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ModelError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "chat completion request rejected");
            return Err(classify_status(status, body));
        }

        let completion: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidPayload(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ModelError::InvalidPayload("completion contained no message content".to_string())
            })
    }
}

/// Maps a non-success HTTP status to the agent's error taxonomy.
fn classify_status(status: StatusCode, body: String) -> ModelError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ModelError::Auth(body),
        StatusCode::TOO_MANY_REQUESTS => ModelError::RateLimited(body),
        _ => ModelError::Api {
            status: status.as_u16(),
            body,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth_statuses() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, "bad key".to_string()),
            ModelError::Auth(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, "no access".to_string()),
            ModelError::Auth(_)
        ));
    }

    #[test]
    fn test_classify_rate_limit() {
        assert!(matches!(
            classify_status(StatusCode::TOO_MANY_REQUESTS, "slow down".to_string()),
            ModelError::RateLimited(_)
        ));
    }

    #[test]
    fn test_classify_other_statuses_as_api() {
        let err = classify_status(StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string());
        match err {
            ModelError::Api { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_is_tolerated() {
        let client = OpenAiClient::new("key").with_base_url("http://localhost:11434/v1/");
        assert_eq!(
            format!("{}/chat/completions", client.base_url.trim_end_matches('/')),
            "http://localhost:11434/v1/chat/completions"
        );
    }
}
