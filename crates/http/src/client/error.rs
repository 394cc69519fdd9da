//! Client error types

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Client error types
///
/// Status-classified variants carry the raw response body so callers can
/// extract the backend's `detail` field.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned an error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Authentication failed (401)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Forbidden (403), the token was rejected or lacks privileges
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Request body failed server-side validation (422)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// One failure handed to several callers of the same request
    #[error(transparent)]
    Shared(Arc<ClientError>),
}

/// Coarse classification used by retry and logout policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Transport failure, no response
    Network,
    /// 401
    Unauthorized,
    /// 403
    Forbidden,
    /// 404
    NotFound,
    /// 400 and 422
    Validation,
    /// Any other non-success status
    Server,
    /// Response could not be decoded
    Decode,
    /// Client misconfiguration
    Configuration,
}

/// The `detail` member of an error body, as produced by the backend
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetail {
    /// `{"detail": "Incorrect email or password"}`
    Message(String),
    /// `{"detail": [{"loc": [...], "msg": "..."}]}`, field-level validation errors
    List(Vec<Value>),
    /// Any other JSON value under `detail`
    Other(Value),
}

impl ClientError {
    /// Create error from HTTP status code and response body
    pub fn from_status(status: reqwest::StatusCode, message: String) -> Self {
        match status.as_u16() {
            400 => Self::BadRequest(message),
            401 => Self::AuthenticationFailed(message),
            403 => Self::Forbidden(message),
            404 => Self::NotFound(message),
            422 => Self::Validation(message),
            _ => Self::ServerError {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(422),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            Self::Serialization(_) | Self::Configuration(_) => None,
            Self::Shared(inner) => inner.status(),
        }
    }

    /// Raw response body of a status error
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::BadRequest(body)
            | Self::AuthenticationFailed(body)
            | Self::Forbidden(body)
            | Self::NotFound(body)
            | Self::Validation(body)
            | Self::ServerError { message: body, .. } => Some(body),
            Self::Request(_) | Self::Serialization(_) | Self::Configuration(_) => None,
            Self::Shared(inner) => inner.body(),
        }
    }

    /// Parse the backend's `detail` field out of the response body.
    ///
    /// A body that is itself a JSON array is reported as a list.
    pub fn detail(&self) -> Option<ErrorDetail> {
        let value: Value = serde_json::from_str(self.body()?).ok()?;
        match value {
            Value::Array(items) => Some(ErrorDetail::List(items)),
            Value::Object(mut map) => match map.remove("detail")? {
                Value::String(message) => Some(ErrorDetail::Message(message)),
                Value::Array(items) => Some(ErrorDetail::List(items)),
                other => Some(ErrorDetail::Other(other)),
            },
            _ => None,
        }
    }

    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Request(err) if err.is_decode() => ErrorKind::Decode,
            Self::Request(_) => ErrorKind::Network,
            Self::AuthenticationFailed(_) => ErrorKind::Unauthorized,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::BadRequest(_) | Self::Validation(_) => ErrorKind::Validation,
            Self::ServerError { .. } => ErrorKind::Server,
            Self::Serialization(_) => ErrorKind::Decode,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Shared(inner) => inner.kind(),
        }
    }

    /// Whether the server rejected the credentials outright (403)
    pub fn is_forbidden(&self) -> bool {
        self.kind() == ErrorKind::Forbidden
    }
}
