//! Backend error types

use thiserror::Error;

/// Errors that can occur when talking to the notes backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Build an API error from a non-2xx status and its raw body.
    ///
    /// FastAPI reports failures as `{"detail": ...}`; the detail is used as
    /// the message when present, otherwise the raw body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<super::dto::ErrorBody>(body)
            .map(|error| error.message())
            .unwrap_or_else(|_| body.trim().to_string());
        BackendError::Api { status, message }
    }

    /// HTTP status for API errors
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(feature = "native")]
impl From<reqwest::Error> for BackendError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendError::Timeout
        } else if e.is_connect() {
            BackendError::Unavailable
        } else if e.is_decode() {
            BackendError::Decode(e.to_string())
        } else {
            BackendError::Request(e.to_string())
        }
    }
}
