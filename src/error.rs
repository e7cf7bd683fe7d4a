//! Error types for PSA API operations.

use thiserror::Error;

/// Errors that can occur during PSA API operations.
#[derive(Debug, Error)]
pub enum PsaError {
    /// Configuration is missing or incomplete.
    #[error("PSA configuration required: {0}")]
    ConfigMissing(String),

    /// API request failed with a non-success status.
    #[error("PSA API error: {message}")]
    Api {
        message: String,
        status_code: Option<u16>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Rate limited.
    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    /// The response body did not carry the expected envelope.
    #[error("Malformed response: expected {expected}")]
    MalformedResponse { expected: &'static str },
}

impl PsaError {
    /// Whether a failed attempt with this error may be retried.
    ///
    /// Transport-level failures, 5xx responses, and rate limiting are
    /// transient; everything else (4xx, parse failures, bad config) will
    /// fail the same way on the next attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            PsaError::Http(err) => {
                err.is_connect() || err.is_timeout() || err.is_body() || err.is_request()
            }
            PsaError::Api { status_code, .. } => {
                matches!(status_code, Some(code) if *code >= 500)
            }
            PsaError::RateLimited { .. } => true,
            _ => false,
        }
    }
}

/// Result type alias for PSA operations.
pub type Result<T> = core::result::Result<T, PsaError>;
