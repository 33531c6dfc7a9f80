//! Model client seam between the workflow controller and a hosted model.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::state::Message;

/// Failures raised by a model invocation.
///
/// These are hard failures for the attempt: the controller propagates them to
/// the caller without retrying and without persisting session state.
#[derive(Debug, Error)]
pub enum ModelError {
    /// The model service was unreachable or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The service rejected the request's credentials.
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// The service rate-limited the request.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The service returned a non-success status not covered above.
    #[error("model service returned status {status}: {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The invocation exceeded the configured deadline.
    #[error("model call timed out after {0:?}")]
    Timeout(Duration),

    /// The service replied 2xx but the completion envelope was unusable.
    #[error("malformed completion payload: {0}")]
    InvalidPayload(String),
}

/// A text-generation model the controller can invoke.
///
/// One call per extraction attempt; implementations perform no retries. The
/// reply is the model's raw text, fence noise and all — parsing is the
/// controller's concern.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Sends the message sequence and returns the model's raw text reply.
    async fn generate(
        &self,
        messages: &[Message],
        temperature: f32,
        model: &str,
    ) -> Result<String, ModelError>;
}
