pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Returned for every error response:
/// - `code`: integer error code for logging/monitoring (e.g., 1004)
/// - `error`: machine-readable error identifier (e.g., "NOT_FOUND")
/// - `message`: human-readable error message
/// - `details`: optional additional error details (e.g., validation errors)
///
/// # JSON Example
///
/// ```json
/// {
///   "code": 1004,
///   "error": "NOT_FOUND",
///   "message": "User not found"
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details (e.g., validation field errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Application error type that can be converted to HTTP responses.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details, code) = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), e.body_text(), None, ErrorCode::JsonExtraction)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    e
                );
                let (message, details) = summarize_validation(&e);
                (
                    StatusCode::BAD_REQUEST,
                    message,
                    Some(details),
                    ErrorCode::ValidationError,
                )
            }
            AppError::BadRequest(msg) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidArguments.code(),
                    "Bad request: {}",
                    msg
                );
                (
                    StatusCode::BAD_REQUEST,
                    msg,
                    None,
                    ErrorCode::InvalidArguments,
                )
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    "Not found: {}",
                    msg
                );
                (StatusCode::NOT_FOUND, msg, None, ErrorCode::NotFound)
            }
            AppError::InternalServerError(msg) => {
                // Raw cause stays in the logs only
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InternalError.default_message().to_string(),
                    None,
                    ErrorCode::InternalError,
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code.code(),
            error: code.as_str().to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Flattens validator output into a message and a `{field: message}` map.
///
/// Fields are ordered by name so the message is stable across runs.
fn summarize_validation(errors: &ValidationErrors) -> (String, Value) {
    let mut fields: Vec<(String, String)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| format!("{} is invalid", field));
            (field.to_string(), message)
        })
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = if fields.is_empty() {
        ErrorCode::ValidationError.default_message().to_string()
    } else {
        fields
            .iter()
            .map(|(_, m)| m.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    };

    let details = fields
        .into_iter()
        .map(|(field, msg)| (field, Value::String(msg)))
        .collect::<Map<String, Value>>();

    (message, Value::Object(details))
}

/// Helper function to create error responses.
///
/// ```rust,ignore
/// use axum_helpers::errors::{error_response, ErrorCode};
/// use axum::http::StatusCode;
///
/// let response = error_response(
///     StatusCode::BAD_REQUEST,
///     "Invalid input".to_string(),
///     ErrorCode::ValidationError,
/// );
/// ```
pub fn error_response(status: StatusCode, message: String, error_code: ErrorCode) -> Response {
    (status, Json(ErrorResponse::new(error_code, message))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::ValidationError;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn required(field: &'static str, message: &'static str) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.add(field, ValidationError::new("required").with_message(message.into()));
        errors
    }

    #[tokio::test]
    async fn test_not_found_envelope() {
        let response = AppError::NotFound("User not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], 1004);
        assert_eq!(body["error"], "NOT_FOUND");
        assert_eq!(body["message"], "User not found");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_validation_single_field_uses_field_message() {
        let response =
            AppError::ValidationError(required("name", "Name cannot be blank")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Name cannot be blank");
        assert_eq!(body["details"]["name"], "Name cannot be blank");
    }

    #[tokio::test]
    async fn test_validation_multiple_fields_sorted() {
        let mut errors = required("name", "Name cannot be blank");
        errors.add(
            "email",
            ValidationError::new("required").with_message("email cannot be blank".into()),
        );

        let body = body_json(AppError::ValidationError(errors).into_response()).await;
        assert_eq!(body["message"], "email cannot be blank; Name cannot be blank");
        assert_eq!(body["details"].as_object().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response =
            AppError::InternalServerError("duplicate key value".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "An internal server error occurred");
    }

    #[tokio::test]
    async fn test_bad_request_uses_invalid_arguments_code() {
        let body =
            body_json(AppError::BadRequest("expected an object".to_string()).into_response())
                .await;
        assert_eq!(body["code"], 1002);
        assert_eq!(body["message"], "expected an object");
    }
}
