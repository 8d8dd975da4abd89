//! Error types for the Discord OAuth client

use reqwest::{Method, StatusCode, header::HeaderMap};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for the Discord OAuth client
pub type Result<T> = std::result::Result<T, Error>;

/// Discord OAuth client errors
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or missing call parameters, raised before any network call
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network-level failure (timeout, connection reset, TLS)
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-2xx response whose body is not a Discord error payload
    #[error(transparent)]
    Http(Box<HttpError>),

    /// Structured rejection from Discord
    #[error(transparent)]
    Rest(Box<RestError>),

    /// A successful response body that does not match the expected shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// HTTP status of the failed response, if the request reached Discord
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Http(e) => Some(e.status),
            Self::Rest(e) => Some(e.status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Whether Discord rejected the request with 429 Too Many Requests
    #[must_use]
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(StatusCode::TOO_MANY_REQUESTS)
    }
}

impl From<HttpError> for Error {
    fn from(err: HttpError) -> Self {
        Self::Http(Box::new(err))
    }
}

impl From<RestError> for Error {
    fn from(err: RestError) -> Self {
        Self::Rest(Box::new(err))
    }
}

/// Error payload returned by Discord on rejected requests
///
/// `code` and `message` are always sent for API errors. Rate-limit responses
/// carry `retry_after` (seconds, fractional) and `global` instead of a code.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Discord JSON error code (not the HTTP status)
    #[serde(default)]
    pub code: u64,

    /// Human-readable message
    #[serde(default)]
    pub message: String,

    /// Nested field-level errors (`Invalid Form Body`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Value>,

    /// Seconds to wait before retrying (429 only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<f64>,

    /// Whether the global rate limit was hit (429 only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<bool>,

    /// OAuth2 token endpoint error (`invalid_grant`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// OAuth2 token endpoint error description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}

/// Structured rejection from Discord (non-2xx with a JSON error body)
#[derive(Debug, Clone)]
pub struct RestError {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Request method
    pub method: Method,
    /// Request path, relative to the versioned API base
    pub path: String,
    /// Parsed error body
    pub response: ErrorBody,
    /// Wait derived from `retry_after` plus the configured rate-limit offset
    pub retry_delay: Option<Duration>,
}

impl RestError {
    /// Discord JSON error code
    #[must_use]
    pub fn code(&self) -> u64 {
        self.response.code
    }

    /// `retry_after` as sent by Discord, in seconds
    #[must_use]
    pub fn retry_after(&self) -> Option<f64> {
        self.response.retry_after
    }

    /// Field-level messages from the error body
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        match &self.response.errors {
            Some(errors) => flatten_errors(errors, ""),
            None => Vec::new(),
        }
    }

    fn summary(&self) -> &str {
        if !self.response.message.is_empty() {
            &self.response.message
        } else if let Some(description) = &self.response.error_description {
            description
        } else if let Some(error) = &self.response.error {
            error
        } else {
            "Unknown error"
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Discord REST error [{}]: {} {} on {} {}",
            self.response.code,
            self.status.as_u16(),
            self.summary(),
            self.method,
            self.path
        )?;
        for message in self.messages() {
            write!(f, "\n  {message}")?;
        }
        Ok(())
    }
}

impl std::error::Error for RestError {}

/// Non-2xx response that could not be parsed as a Discord error body
#[derive(Debug, Clone)]
pub struct HttpError {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Request method
    pub method: Method,
    /// Request path, relative to the versioned API base
    pub path: String,
    /// Raw response body
    pub body: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Discord HTTP error: {} {} on {} {}",
            self.status.as_u16(),
            self.status.canonical_reason().unwrap_or("Unknown"),
            self.method,
            self.path
        )
    }
}

impl std::error::Error for HttpError {}

/// Flatten Discord's nested field-error tree into display lines
///
/// `{"user": {"name": {"_errors": [{"message": "Too long"}]}}}` becomes
/// `["user.name: Too long"]`. Top-level `code` and `message` keys are skipped.
#[must_use]
pub fn flatten_errors(errors: &Value, key_prefix: &str) -> Vec<String> {
    let Some(fields) = errors.as_object() else {
        return Vec::new();
    };

    let mut messages = Vec::new();
    for (field, value) in fields {
        if field == "message" || field == "code" {
            continue;
        }
        if let Some(field_errors) = value.get("_errors").and_then(Value::as_array) {
            messages.extend(field_errors.iter().map(|e| {
                let message = e.get("message").and_then(Value::as_str).unwrap_or("");
                format!("{key_prefix}{field}: {message}")
            }));
        } else if let Some(items) = value.as_array() {
            messages.extend(items.iter().map(|item| match item.as_str() {
                Some(s) => format!("{key_prefix}{field}: {s}"),
                None => format!("{key_prefix}{field}: {item}"),
            }));
        } else if value.is_object() {
            messages.extend(flatten_errors(value, &format!("{key_prefix}{field}.")));
        }
    }
    messages
}
