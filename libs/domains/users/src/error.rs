use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    /// Storage rejected a second active row with this email
    #[error("Unique email constraint violated for '{0}'")]
    UniqueEmail(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Database(#[from] DbErr),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(id) => AppError::NotFound(format!("User with ID {} not found", id)),
            UserError::DuplicateEmail(_) => {
                AppError::Conflict("User with this email already exists".to_string())
            }
            UserError::UniqueEmail(_) => AppError::Conflict(
                ErrorCode::DatabaseUniqueViolation.default_message().to_string(),
            ),
            UserError::PasswordHash(msg) => {
                AppError::InternalServerError(format!("password hashing failed: {}", msg))
            }
            UserError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
