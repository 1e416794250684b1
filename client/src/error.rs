//! Error handling for the AgriYield client
//!
//! Every variant displays as the message the user should see, so the view
//! can store `error.to_string()` without further mapping.

use thiserror::Error;

/// Client error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    /// Rejected client-side before any request was issued
    #[error("{0}")]
    Validation(String),

    /// Network or connection failure
    #[error("{0}")]
    Transport(String),

    /// Non-2xx response; `message` is the backend's `detail` when present
    #[error("{message}")]
    Server { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Transport(_) => "TRANSPORT_ERROR",
            ClientError::Server { .. } => "SERVER_ERROR",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(format!("Request failed: {}", e))
        }
    }
}

impl From<shared::FormError> for ClientError {
    fn from(e: shared::FormError) -> Self {
        ClientError::Validation(e.to_string())
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(e: config::ConfigError) -> Self {
        ClientError::Configuration(e.to_string())
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;
