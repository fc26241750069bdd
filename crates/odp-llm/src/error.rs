//! LLM error types.

use thiserror::Error;

/// Errors from generating and extracting a structured model response.
///
/// Every variant is retryable from the point of view of
/// [`JsonCaller`](crate::JsonCaller) except [`LlmError::Unavailable`], which
/// only arises while building a backend.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP transport error (connection refused, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The inference server returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the server.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The in-process model failed to load or to generate.
    #[error("local model error: {0}")]
    Local(String),

    /// No `{ ... }` span in the model output.
    #[error("no JSON object found in model output")]
    Extraction,

    /// A `{ ... }` span was found but is not valid JSON.
    #[error("model output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured backend cannot be constructed in this build.
    #[error("LLM backend '{backend}' is unavailable: {reason}")]
    Unavailable {
        backend: &'static str,
        reason: String,
    },
}
