//! Paper search error types.

use thiserror::Error;

/// Errors that can occur when searching for papers.
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The search API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the search API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The search API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Failed to parse a search response.
    #[error("parse error: {0}")]
    Parse(String),
}
