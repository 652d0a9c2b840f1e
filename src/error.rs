//! API Errors
//!
//! Failures from the auth and data endpoints.

use serde::Deserialize;
use thiserror::Error;

use crate::config::ConfigError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Request failed: {0}")]
    Http(String),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Row already exists: {0}")]
    Conflict(String),

    #[error("Not authorized")]
    Unauthorized,

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Browser error: {0}")]
    Browser(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Http(e.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// PostgREST / GoTrue error body. Both services use overlapping field names.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Unique-violation SQLSTATE reported by PostgREST
const UNIQUE_VIOLATION: &str = "23505";

impl ApiError {
    /// Map a non-success status and its body to an error
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = match parsed.code {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        };
        let message = parsed
            .message
            .or(parsed.msg)
            .or(parsed.error_description)
            .unwrap_or_else(|| body.trim().to_string());

        match status {
            401 | 403 => ApiError::Unauthorized,
            409 => ApiError::Conflict(message),
            _ if code == UNIQUE_VIOLATION => ApiError::Conflict(message),
            _ => ApiError::Api { status, code, message },
        }
    }
}
