//! Shared HTTP response helpers for remote backends.

use crate::error::LlmError;

/// Return the response unchanged on success, or [`LlmError::Api`] carrying
/// the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LlmError> {
    if !resp.status().is_success() {
        return Err(LlmError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
