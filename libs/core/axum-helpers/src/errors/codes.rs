//! Type-safe error codes for API responses.
//!
//! Each error code carries:
//! - a string representation for clients (e.g., "VALIDATION_ERROR")
//! - an integer code for logs and monitoring (e.g., 1001)
//! - a default human-readable message
//!
//! # Example
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Request validation failed");
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Standardized error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    /// Request validation failed
    ValidationError,

    /// Request arguments could not be decoded into the expected shape
    InvalidArguments,

    /// JSON extraction from request body failed
    JsonExtraction,

    /// Requested resource was not found
    NotFound,

    /// An unexpected internal server error occurred
    InternalError,

    /// HTTP method not supported by the route
    MethodNotAllowed,
}

impl ErrorCode {
    /// SCREAMING_SNAKE_CASE identifier clients can match on.
    ///
    /// ```rust
    /// use axum_helpers::errors::ErrorCode;
    ///
    /// assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidArguments => "INVALID_ARGUMENTS",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
        }
    }

    /// Integer code used in structured logs and metrics.
    ///
    /// Client errors use 1000-1099, server errors 1005 and up.
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidArguments => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::InternalError => 1005,
            Self::MethodNotAllowed => 1010,
        }
    }

    /// Default user-facing message. Handlers may override it.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidArguments => "Invalid request arguments",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::InternalError => "An internal server error occurred",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_string_representation() {
        assert_eq!(ErrorCode::ValidationError.as_str(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::NotFound.as_str(), "NOT_FOUND");
        assert_eq!(ErrorCode::InvalidArguments.as_str(), "INVALID_ARGUMENTS");
    }

    #[test]
    fn test_error_code_integer_codes() {
        assert_eq!(ErrorCode::ValidationError.code(), 1001);
        assert_eq!(ErrorCode::NotFound.code(), 1004);
        assert_eq!(ErrorCode::MethodNotAllowed.code(), 1010);
    }

    #[test]
    fn test_error_code_display_matches_serde() {
        let code = ErrorCode::JsonExtraction;
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, format!("\"{}\"", code));
    }

    #[test]
    fn test_error_code_deserialization() {
        let code: ErrorCode = serde_json::from_str("\"METHOD_NOT_ALLOWED\"").unwrap();
        assert_eq!(code, ErrorCode::MethodNotAllowed);
    }
}
