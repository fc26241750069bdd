//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Requested schema name was not found in the registry.
    #[error("Schema not found: {0}")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("Validation against '{schema}' failed: {}", errors.join("; "))]
    ValidationFailed {
        /// Schema the value was checked against.
        schema: String,
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Schema compilation error.
    #[error("Schema generation error: {0}")]
    Generation(String),

    /// The value passed validation but could not be deserialized.
    #[error("Deserialization into '{schema}' failed: {source}")]
    Deserialize {
        schema: String,
        #[source]
        source: serde_json::Error,
    },
}
