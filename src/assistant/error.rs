//! Typed errors for agent backend calls
//!
//! Every variant is recovered by the router, which answers from the fallback
//! table instead. The variants exist so the log line says what went wrong.

use thiserror::Error;

/// Agent backend failures
#[derive(Debug, Error)]
pub enum BackendError {
    /// Backend answered with a non-2xx status
    #[error("Backend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Backend did not answer within the configured timeout
    #[error("Backend timed out after {0} seconds")]
    Timeout(u64),

    /// Connection refused, DNS failure, reset, etc.
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body could not be decoded
    #[error("Malformed backend response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Convert a non-success HTTP status and its body text
    pub fn from_http_status(status: reqwest::StatusCode, body: String) -> Self {
        BackendError::Status {
            status: status.as_u16(),
            body,
        }
    }

    /// Convert network/connection errors into typed BackendError
    pub fn from_network_error(e: reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            BackendError::Timeout(timeout_secs)
        } else if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::from_http_status(status, e.to_string())
        } else {
            BackendError::Network(e.to_string())
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout(_))
    }
}
