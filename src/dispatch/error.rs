//! Error types for the request dispatcher.
//!
//! Transport and parse errors propagate to the caller untouched; nothing
//! here is retried or recovered locally.

use thiserror::Error;

/// Errors that can occur while building or executing a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server answered with a non-success status
    #[error("Transport error: {status} {status_text}")]
    Transport { status: u16, status_text: String },

    /// Response body is not a valid wire document
    #[error("Malformed response: {source}")]
    MalformedResponse {
        #[source]
        source: serde_json::Error,
    },

    /// Failed to reach the server
    #[error("Connection failed to '{url}': {source}")]
    Connection {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Host or endpoint is not a usable URL
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Header name or value rejected by the HTTP layer
    #[error("Invalid header '{name}'")]
    InvalidHeader { name: String },

    /// Request document could not be encoded
    #[error("Failed to encode request body: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    /// Response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// HTTP client could not be constructed
    #[error("HTTP client error: {0}")]
    Client(String),
}

impl ApiError {
    /// HTTP status of a transport error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Short machine-readable error kind for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Transport { .. } => "transport_error",
            ApiError::MalformedResponse { .. } => "malformed_response",
            ApiError::Connection { .. } => "connection_error",
            ApiError::InvalidUrl { .. } => "invalid_url",
            ApiError::InvalidHeader { .. } => "invalid_header",
            ApiError::Encode { .. } => "encode_error",
            ApiError::Body(_) => "body_error",
            ApiError::Client(_) => "client_error",
        }
    }
}
