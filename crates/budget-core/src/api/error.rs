use serde_json::Value;
use thiserror::Error;

/// Message used when a failed response carries no readable message
pub const FALLBACK_ERROR_MESSAGE: &str = "Unknown API error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Session expired - please log in again")]
    AuthenticationExpired,

    #[error("{message} (status {status})")]
    RequestFailed { message: String, status: u16 },

    #[error("Invalid authentication response from server")]
    InvalidAuthResponse,

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request payload: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    /// Build a `RequestFailed` from a non-2xx, non-401 response body.
    ///
    /// Any JSON body is searched for a `message` field: a non-empty string is
    /// used as-is and any other truthy value is rendered as JSON. A JSON body
    /// without a usable message names the status. Unparsable bodies get the
    /// fallback.
    pub fn from_failed_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::body_message(&value)
                .unwrap_or_else(|| format!("Request failed with status {}", status)),
            Err(_) => FALLBACK_ERROR_MESSAGE.to_string(),
        };
        ApiError::RequestFailed { message, status }
    }

    fn body_message(body: &Value) -> Option<String> {
        match body.get("message")? {
            Value::Null | Value::Bool(false) => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }

    /// Status code carried by the error, when the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::AuthenticationExpired => Some(401),
            ApiError::RequestFailed { status, .. } => Some(*status),
            ApiError::NetworkError(e) => e.status().map(|s| s.as_u16()),
            ApiError::InvalidAuthResponse
            | ApiError::InvalidResponse(_)
            | ApiError::InvalidPayload(_) => None,
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ApiError::AuthenticationExpired)
    }
}
