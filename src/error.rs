//! Error taxonomy for folding requests.

use thiserror::Error;

use crate::utils::validation::ValidationError;

/// Terminal failures of a folding request.
///
/// None of these are retried internally; callers decide whether to resubmit.
#[derive(Error, Debug)]
pub enum FoldingError {
    /// Input rejected before any network call
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The provider answered with a definitive error status
    #[error("{message}")]
    Provider {
        status: u16,
        message: String,
        /// Structured error body, when the provider sent JSON
        body: Option<serde_json::Value>,
    },

    /// A single submit or poll exchange exceeded its bound, or an opt-in polling bound was hit
    #[error("{0}")]
    Timeout(String),

    /// The connection to the provider could not be established
    #[error("{0}")]
    Connection(String),

    /// Any other transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// The provider's success body was not the expected JSON
    #[error("Invalid provider response: {0}")]
    Decode(String),
}

pub type Result<T> = std::result::Result<T, FoldingError>;

impl FoldingError {
    /// Build a provider error from a status code and raw response body
    #[must_use]
    pub fn provider(status: u16, context: &str, body_text: &str) -> Self {
        let body = serde_json::from_str::<serde_json::Value>(body_text).ok();
        FoldingError::Provider {
            status,
            message: format!("{context}: {status} - {body_text}"),
            body,
        }
    }

    /// Classify a transport error from the HTTP client
    #[must_use]
    pub fn from_transport(err: &reqwest::Error, provider: &str) -> Self {
        if err.is_timeout() {
            FoldingError::Timeout(format!("{provider} API request timed out"))
        } else if err.is_connect() {
            FoldingError::Connection(format!("Failed to connect to {provider} API"))
        } else if err.is_decode() {
            FoldingError::Decode(err.to_string())
        } else {
            FoldingError::Request(err.to_string())
        }
    }

    /// HTTP status the boundary layer reports for this error
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            FoldingError::Validation(_) => 400,
            FoldingError::Provider { status, .. } => *status,
            FoldingError::Timeout(_) => 408,
            FoldingError::Connection(_) => 503,
            FoldingError::Request(_) | FoldingError::Decode(_) => 500,
        }
    }

    /// Short machine-readable category
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            FoldingError::Validation(_) => "validation_error",
            FoldingError::Provider { .. } => "provider_error",
            FoldingError::Timeout(_) => "timeout",
            FoldingError::Connection(_) => "connection_error",
            FoldingError::Request(_) => "request_error",
            FoldingError::Decode(_) => "invalid_response",
        }
    }
}
