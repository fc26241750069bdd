//! Cross-cutting error types for text2odp.
//!
//! Domain-specific errors (`LlmError`, `SearchError`, `PipelineError`, ...)
//! live in their own crates and converge in `odp-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any text2odp crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A string did not name any variant of the target enum.
    #[error("unknown {kind} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        kind: &'static str,
        value: String,
        expected: &'static str,
    },
}
