//! Error types for the analyze proxy
//!
//! Every variant collapses into the same generic envelope with HTTP 500.
//! Only the message differs: an engine that answered with a failure status
//! gets the engine message, everything else gets the proxy message plus the
//! fault text as `details`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use felix_common::ErrorEnvelope;
use thiserror::Error;

pub const ENGINE_FAILURE_MESSAGE: &str = "Failed to communicate with AI Engine";
pub const PROXY_FAILURE_MESSAGE: &str = "Frontend API Proxy Failed";

/// Analyze proxy error
#[derive(Debug, Error)]
pub enum ProxyError {
    /// AI Engine answered with a non-success status
    #[error("AI Engine returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Connection, DNS or timeout failure talking to the engine
    #[error("Transport error: {0}")]
    Transport(String),

    /// Inbound multipart form could not be read
    #[error("Multipart error: {0}")]
    Multipart(String),

    /// Engine success body was not JSON
    #[error("Decode error: {0}")]
    Decode(String),
}

impl ProxyError {
    /// Generic envelope surfaced to the caller
    pub fn envelope(&self) -> ErrorEnvelope {
        match self {
            ProxyError::Upstream { .. } => ErrorEnvelope::new(ENGINE_FAILURE_MESSAGE),
            other => ErrorEnvelope::new(PROXY_FAILURE_MESSAGE).with_details(other.to_string()),
        }
    }
}

impl From<axum::extract::multipart::MultipartError> for ProxyError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        ProxyError::Multipart(err.to_string())
    }
}

impl From<axum::extract::multipart::MultipartRejection> for ProxyError {
    fn from(err: axum::extract::multipart::MultipartRejection) -> Self {
        ProxyError::Multipart(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self.envelope())).into_response()
    }
}

/// Result type for the analyze handler
pub type ProxyResult<T> = Result<T, ProxyError>;
