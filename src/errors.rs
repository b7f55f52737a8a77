use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::lro::OperationState;
use crate::models::JobState;

/// All errors that can occur when using the media services client.
#[derive(Error, Debug)]
pub enum MediaError {
    /// An argument failed a client-side check. No request was sent.
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The service rejected the request payload (HTTP 400).
    #[error("bad request: {}", .error.message)]
    BadRequest { error: ErrorDetail },

    /// The bearer token is missing, expired or invalid (HTTP 401).
    #[error("authentication failed: {message}")]
    Authentication { message: String },

    /// The caller is not allowed to touch the resource (HTTP 403).
    #[error("permission denied: {message}")]
    PermissionDenied { message: String },

    /// The requested resource was not found (HTTP 404).
    #[error("not found: {message}")]
    NotFound { message: String },

    /// The resource is in a state that conflicts with the request (HTTP 409).
    #[error("conflict: {}", .error.message)]
    Conflict { error: ErrorDetail },

    /// The request was throttled (HTTP 429).
    #[error("rate limited (retry after {retry_after:?}): {message}")]
    RateLimit {
        message: String,
        retry_after: Option<Duration>,
    },

    /// Any other non-success status, with the service error code and body.
    #[error("API error {status_code} ({code}): {message}")]
    Api {
        status_code: u16,
        code: String,
        message: String,
        body: Option<serde_json::Value>,
    },

    /// A transport-level HTTP error from reqwest.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A response body did not match the expected model.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A request URL could not be assembled.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The service answered in a way the protocol does not allow.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A long-running operation ended in `Failed` or `Canceled`.
    #[error("operation {status:?}: {}", error_message(.error))]
    OperationFailed {
        status: OperationState,
        error: Option<ErrorDetail>,
    },

    /// Polling exceeded the configured timeout.
    #[error("poll timed out after {0:?}")]
    Timeout(Duration),

    /// A job ended in `Error` or `Canceled`.
    #[error("job {name} ended in state {state:?}: {message}")]
    JobFailed {
        name: String,
        state: JobState,
        message: String,
    },
}

impl MediaError {
    pub(crate) fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        MediaError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status of the failed response, if the error came from one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            MediaError::BadRequest { .. } => Some(400),
            MediaError::Authentication { .. } => Some(401),
            MediaError::PermissionDenied { .. } => Some(403),
            MediaError::NotFound { .. } => Some(404),
            MediaError::Conflict { .. } => Some(409),
            MediaError::RateLimit { .. } => Some(429),
            MediaError::Api { status_code, .. } => Some(*status_code),
            MediaError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether a retry of the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            MediaError::RateLimit { .. } => true,
            MediaError::Api { status_code, .. } => *status_code >= 500,
            MediaError::Http(e) => !e.is_builder(),
            _ => false,
        }
    }

    /// Map a non-success response to a typed error.
    pub(crate) fn from_response(
        status_code: u16,
        text: &str,
        retry_after: Option<Duration>,
    ) -> Self {
        let body: Option<serde_json::Value> = serde_json::from_str(text).ok();
        let error = body
            .as_ref()
            .and_then(ErrorDetail::from_body)
            .unwrap_or_else(|| ErrorDetail {
                code: String::new(),
                message: text.to_string(),
                target: None,
                details: Vec::new(),
            });

        match status_code {
            400 => MediaError::BadRequest { error },
            401 => MediaError::Authentication {
                message: error.message,
            },
            403 => MediaError::PermissionDenied {
                message: error.message,
            },
            404 => MediaError::NotFound {
                message: error.message,
            },
            409 => MediaError::Conflict { error },
            429 => MediaError::RateLimit {
                message: error.message,
                retry_after,
            },
            _ => MediaError::Api {
                status_code,
                code: error.code,
                message: error.message,
                body,
            },
        }
    }
}

/// The service's error payload, `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

impl ErrorDetail {
    /// Accepts both the wrapped `{"error": {...}}` and a bare detail object.
    pub(crate) fn from_body(body: &serde_json::Value) -> Option<Self> {
        let inner = body.get("error").unwrap_or(body);
        if !inner.is_object() {
            return None;
        }
        let detail: ErrorDetail = serde_json::from_value(inner.clone()).ok()?;
        if detail.code.is_empty() && detail.message.is_empty() {
            return None;
        }
        Some(detail)
    }
}

fn error_message(error: &Option<ErrorDetail>) -> &str {
    error
        .as_ref()
        .map(|e| e.message.as_str())
        .unwrap_or("no error details")
}

/// A convenience alias for `Result<T, MediaError>`.
pub type Result<T> = std::result::Result<T, MediaError>;
