//! Errors surfaced by the workflow controller.

use thiserror::Error;

use crate::model::ModelError;

/// Unrecoverable failures of one `extract` call.
///
/// Malformed model replies are *not* represented here — the controller
/// converts those into the session's `error` status and still returns a
/// well-formed outcome.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AgentError {
    /// The model invocation failed (transport, auth, rate limit, timeout).
    /// No session state was persisted for the call.
    #[error("model invocation failed: {0}")]
    Model(#[from] ModelError),
}
