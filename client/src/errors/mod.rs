//! Global error types used across the client.
//!
//! This module defines the error taxonomy for everything the SDK can fail
//! with: transport failures, decoded HTTP errors, and local validation
//! failures caught before a request is ever sent.

use std::collections::BTreeMap;
use thiserror::Error;

/// A field-specific validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: String,
    /// Description of the validation failure.
    pub message: String,
}

/// Errors surfaced by API calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connection refused, DNS
    /// failure, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status.
    #[error("{message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Machine-readable error code from the backend envelope, or
        /// `"HTTP_ERROR"` when the body carried none.
        error_code: String,
        /// Human-readable message; never empty.
        message: String,
        /// Field-specific messages from the envelope's `details`, if any.
        field_errors: Option<BTreeMap<String, String>>,
    },

    /// A 2xx response carried a JSON body that does not fit the expected
    /// type. Empty and non-JSON success bodies are tolerated and never reach
    /// this variant.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Request payload rejected locally, before any network call.
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field_errors: Vec<FieldError>,
    },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn http(status: u16, error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            error_code: error_code.into(),
            message: message.into(),
            field_errors: None,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field_errors: Vec::new(),
        }
    }

    /// True for 401 responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// True for 403 responses.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Http { status: 403, .. })
    }

    /// True for 404 responses.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// The backend error code, when this is an HTTP error.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Http { error_code, .. } => Some(error_code),
            _ => None,
        }
    }

    /// First field-specific message, in field-name order for HTTP errors and
    /// declaration order for local validation errors.
    pub fn first_field_error(&self) -> Option<&str> {
        match self {
            Self::Http {
                field_errors: Some(fields),
                ..
            } => fields.values().next().map(String::as_str),
            Self::Validation { field_errors, .. } => {
                field_errors.first().map(|e| e.message.as_str())
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        // Errors carrying a status are decoded by the client from the
        // response body; anything arriving here is a transport failure.
        ApiError::network(err.to_string())
    }
}

/// Flattens `validator::ValidationErrors` into field-specific error details.
pub fn validation_errors_to_field_errors(errors: validator::ValidationErrors) -> Vec<FieldError> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| FieldError {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .unwrap_or(&"Invalid value".into())
                    .to_string(),
            })
        })
        .collect()
}

/// Converts a failed local validation into an [`ApiError::Validation`],
/// using the first field message as the headline.
pub fn validation_error(errors: validator::ValidationErrors) -> ApiError {
    let field_errors = validation_errors_to_field_errors(errors);
    let message = field_errors
        .first()
        .map(|e| e.message.clone())
        .unwrap_or_else(|| "Validation failed".to_string());
    ApiError::Validation {
        message,
        field_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_predicates() {
        let err = ApiError::http(401, "UNAUTHORIZED", "Token expired");
        assert!(err.is_unauthorized());
        assert!(!err.is_forbidden());
        assert_eq!(err.error_code(), Some("UNAUTHORIZED"));
        assert_eq!(err.to_string(), "Token expired");

        let err = ApiError::http(403, "FORBIDDEN", "Not permitted");
        assert!(err.is_forbidden());
        assert!(!err.is_unauthorized());

        let err = ApiError::http(404, "NOT_FOUND", "No such user");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_first_field_error_ordering() {
        let mut fields = BTreeMap::new();
        fields.insert("email".to_string(), "Must be a valid email".to_string());
        fields.insert("password".to_string(), "Too short".to_string());
        let err = ApiError::Http {
            status: 400,
            error_code: "VALIDATION_FAILED".to_string(),
            message: "Validation failed".to_string(),
            field_errors: Some(fields),
        };
        assert_eq!(err.first_field_error(), Some("Must be a valid email"));
    }

    #[test]
    fn test_network_error_display() {
        let err = ApiError::network("connection refused");
        assert_eq!(err.to_string(), "Network error: connection refused");
        assert!(err.first_field_error().is_none());
    }
}
