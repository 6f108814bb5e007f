//! Error types for deepresearch
//!
//! Every failure that ends an invocation with a non-zero exit code is a
//! variant of [`ClientError`]. Application-level errors carried inside a
//! successful response are not errors here; they are rendered and counted.

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Main error type for a query invocation
#[derive(Error, Debug)]
pub enum ClientError {
    /// No query words were given
    #[error("Please provide a query.")]
    EmptyQuery,

    /// The request never completed (DNS, connect, body read)
    #[error("Error making request: {0}")]
    Transport(String),

    /// The server answered with a non-success status
    #[error("Error: {status} {reason}: {detail}")]
    ServerStatus {
        status: u16,
        reason: String,
        detail: String,
    },

    /// Streaming errors
    #[error("Streaming error: {0}")]
    StreamingError(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    /// Build a status error from the response status and its raw body.
    ///
    /// A JSON object body carrying an `error` field contributes that field;
    /// any other body is reported as trimmed text.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => match map.get("error") {
                Some(Value::String(message)) => message.clone(),
                Some(other) => other.to_string(),
                None => body.trim().to_string(),
            },
            _ => body.trim().to_string(),
        };

        ClientError::ServerStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            detail,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(err.to_string())
    }
}
