//! Multi-run summarizer error types.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A metric cell is not a number.
    #[error("{}: column '{column}' has non-numeric value '{value}'", path.display())]
    InvalidValue {
        path: PathBuf,
        column: String,
        value: String,
    },

    /// A run lacks a metric column that the first summarized run has.
    #[error("{}: missing column '{column}'", path.display())]
    MissingColumn { path: PathBuf, column: String },
}
