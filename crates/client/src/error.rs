//! Client error types

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Client error types
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or request error
    #[error("Request failed: {0}")]
    Request(reqwest::Error),

    /// The request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Bad request
    #[error("Bad request: {0}")]
    BadRequest(ApiErrorBody),

    /// Authentication failed on a call that bypasses the refresh interceptor
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(ApiErrorBody),

    /// Forbidden
    #[error("Forbidden: {0}")]
    Forbidden(ApiErrorBody),

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(ApiErrorBody),

    /// Request body failed backend validation
    #[error("Validation failed: {0}")]
    Validation(ApiErrorBody),

    /// Server returned any other error status
    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: ApiErrorBody },

    /// The session can no longer be recovered; stored credentials were cleared
    #[error("Session expired, please log in again")]
    SessionExpired,

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    /// Credential storage failure
    #[error("Credential storage error: {0}")]
    Storage(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Request(err)
        }
    }
}

impl ClientError {
    /// Create error from HTTP status code and raw response text
    pub fn from_status(status: reqwest::StatusCode, text: &str) -> Self {
        let body = ApiErrorBody::parse(text);
        match status.as_u16() {
            400 => Self::BadRequest(body),
            401 => Self::AuthenticationFailed(body),
            403 => Self::Forbidden(body),
            404 => Self::NotFound(body),
            422 => Self::Validation(body),
            _ => Self::ServerError {
                status: status.as_u16(),
                body,
            },
        }
    }

    /// HTTP status attached to this error, if the server produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Validation(_) => Some(422),
            Self::ServerError { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Parsed backend error body, if any
    pub fn body(&self) -> Option<&ApiErrorBody> {
        match self {
            Self::BadRequest(body)
            | Self::AuthenticationFailed(body)
            | Self::Forbidden(body)
            | Self::NotFound(body)
            | Self::Validation(body)
            | Self::ServerError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Whether the caller must send the user back to the login screen
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Human-readable message for inline display, or `fallback` if the
    /// backend did not provide one
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::SessionExpired | Self::Timeout => self.to_string(),
            _ => self
                .body()
                .and_then(ApiErrorBody::message)
                .map_or_else(|| fallback.to_string(), str::to_string),
        }
    }
}

/// Error payloads the backend is known to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorBody {
    /// `{ "message": ..., "errors": { field: [..] } }`
    Validation {
        message: String,
        errors: BTreeMap<String, Vec<String>>,
    },
    /// `{ "message": ..., "error"?: ... }`
    Message {
        error: Option<String>,
        message: String,
    },
    /// `{ "error": ... }`
    Code { error: String },
    /// Anything else, kept verbatim
    Unknown(String),
}

#[derive(Deserialize)]
struct RawErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiErrorBody {
    /// Parse a raw response body into one of the known shapes
    pub fn parse(text: &str) -> Self {
        let Ok(raw) = serde_json::from_str::<RawErrorBody>(text) else {
            return Self::Unknown(text.to_string());
        };

        match raw {
            RawErrorBody {
                message: Some(message),
                errors: Some(errors),
                ..
            } if !errors.is_empty() => Self::Validation { message, errors },
            RawErrorBody {
                message: Some(message),
                error,
                ..
            } => Self::Message { error, message },
            RawErrorBody {
                error: Some(error), ..
            } => Self::Code { error },
            _ => Self::Unknown(text.to_string()),
        }
    }

    /// The message suitable for showing to an operator
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Validation { message, .. } | Self::Message { message, .. } => Some(message),
            Self::Code { error } => Some(error),
            Self::Unknown(raw) if !raw.trim().is_empty() => Some(raw),
            Self::Unknown(_) => None,
        }
    }

    /// Field errors of a validation failure
    pub fn field_errors(&self) -> Option<&BTreeMap<String, Vec<String>>> {
        match self {
            Self::Validation { errors, .. } => Some(errors),
            _ => None,
        }
    }
}

impl fmt::Display for ApiErrorBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation { message, errors } => {
                write!(f, "{message}")?;
                for (field, messages) in errors {
                    write!(f, "; {field}: {}", messages.join(", "))?;
                }
                Ok(())
            }
            Self::Message { message, .. } => f.write_str(message),
            Self::Code { error } => f.write_str(error),
            Self::Unknown(raw) if raw.is_empty() => f.write_str("<empty body>"),
            Self::Unknown(raw) => f.write_str(raw),
        }
    }
}
