//! Pipeline error types.

use std::path::PathBuf;

use odp_core::enums::Stage;
use odp_llm::LlmError;
use odp_papers::SearchError;
use odp_schema::SchemaError;
use thiserror::Error;

/// Errors from generating, evaluating, or persisting a run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Paper search failed; a run cannot start without papers.
    #[error("paper search failed: {0}")]
    Search(#[from] SearchError),

    /// The LLM call for `stage` failed after every retry.
    #[error("{stage} stage: {source}")]
    Llm {
        stage: Stage,
        #[source]
        source: LlmError,
    },

    /// The JSON produced for `stage` does not match its schema.
    #[error("{stage} stage: {source}")]
    Schema {
        stage: Stage,
        #[source]
        source: SchemaError,
    },

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// The generation stage this error belongs to, if any.
    #[must_use]
    pub const fn stage(&self) -> Option<Stage> {
        match self {
            Self::Llm { stage, .. } | Self::Schema { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}
