use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Handler for 404 Not Found errors.
///
/// Installed as the router fallback.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

/// Handler for 405 Method Not Allowed errors.
///
/// Installed on every `/api` route.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        ErrorCode::MethodNotAllowed,
    )
}
