//! # Error Types
//!
//! Unified error handling for Ambari polling and metric submission.

use crate::config::ConfigurationError;
use thiserror::Error;

/// Result type for all poller operations
pub type AmbariResult<T> = Result<T, AmbariError>;

#[derive(Debug, Error)]
pub enum AmbariError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON serialization/deserialization failed: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {field} - {reason}")]
    InvalidResponse { field: String, reason: String },

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Metric sink error: {0}")]
    Sink(String),
}

impl AmbariError {
    /// Create an API error from a non-success HTTP response
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid response error for a missing or malformed field
    ///
    /// Ambari responses have a fixed shape; a missing identity field means the
    /// server is not speaking the API we expect and must not be defaulted.
    pub fn invalid_response(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn sink(message: impl Into<String>) -> Self {
        Self::Sink(message.into())
    }
}
