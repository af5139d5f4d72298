use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

/// Fixed client-facing message for a missing user
pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(i64),

    #[error("Invalid arguments: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        UserError::Storage(err.to_string())
    }
}

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => AppError::NotFound(USER_NOT_FOUND.to_string()),
            UserError::Validation(errors) => AppError::ValidationError(errors),
            UserError::Storage(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
