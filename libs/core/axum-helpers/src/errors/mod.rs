pub mod codes;
pub mod database;
pub mod handlers;
pub mod responses;
pub mod validation;

pub use codes::ErrorCode;
pub use database::{DbErrorKind, classify_db_error};
pub use validation::{group_messages_by_field, validation_messages};

use crate::envelope::ErrorEnvelope;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use std::collections::BTreeMap;
use thiserror::Error;
use validator::ValidationErrors;

/// Application error type that can be converted to HTTP responses.
///
/// Every variant renders as an [`ErrorEnvelope`]. Server-side failures are
/// logged with their details and reported to the client with a generic
/// message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    /// `"<field> <message>"` strings, grouped by field in the response
    #[error("Validation failed: {}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("JSON parsing error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable Entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(validation_messages(&errors))
    }
}

type Parts = (StatusCode, String, Option<BTreeMap<String, Vec<String>>>);

impl AppError {
    /// Status, client message and grouped validation errors. Logs as a side effect.
    fn into_parts(self) -> Parts {
        match self {
            AppError::Validation(messages) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    ?messages,
                    "Validation failed"
                );
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError.default_message().to_string(),
                    Some(group_messages_by_field(&messages)),
                )
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::JsonExtraction.code(),
                    "JSON extraction error: {:?}",
                    e
                );
                (e.status(), e.body_text(), None)
            }
            AppError::Database(e) => {
                let (status, message, _) = database::map_db_error(&e);
                (status, message.to_string(), None)
            }
            AppError::SerdeJson(e) => {
                tracing::error!(
                    error_code = ErrorCode::SerdeJsonError.code(),
                    "JSON serialization error: {:?}",
                    e
                );
                internal(ErrorCode::SerdeJsonError)
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::BadRequest.code(), "Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg, None)
            }
            AppError::Unauthorized(msg) => {
                tracing::info!(error_code = ErrorCode::Unauthorized.code(), "Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, msg, None)
            }
            AppError::Forbidden(msg) => {
                tracing::info!(error_code = ErrorCode::Forbidden.code(), "Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, msg, None)
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                (StatusCode::NOT_FOUND, msg, None)
            }
            AppError::Conflict(msg) => {
                tracing::info!(error_code = ErrorCode::Conflict.code(), "Conflict: {}", msg);
                (StatusCode::CONFLICT, msg, None)
            }
            AppError::UnprocessableEntity(msg) => {
                tracing::info!(
                    error_code = ErrorCode::UnprocessableEntity.code(),
                    "Unprocessable entity: {}",
                    msg
                );
                (StatusCode::UNPROCESSABLE_ENTITY, msg, None)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                internal(ErrorCode::InternalError)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                (StatusCode::SERVICE_UNAVAILABLE, msg, None)
            }
        }
    }
}

fn internal(code: ErrorCode) -> Parts {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code.default_message().to_string(),
        None,
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = self.into_parts();
        ErrorEnvelope::new(status, message, errors).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_groups_messages() {
        let error = AppError::Validation(vec![
            "email must be an email".to_string(),
            "password must be longer than or equal to 8 characters".to_string(),
        ]);

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 400);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["email"][0], "email must be an email");
        assert_eq!(
            body["errors"]["password"][0],
            "password must be longer than or equal to 8 characters"
        );
    }

    #[tokio::test]
    async fn test_not_found_envelope_has_null_errors() {
        let response = AppError::NotFound("User not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "User not found");
        assert!(body["errors"].is_null());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_internal_error_hides_details() {
        let response =
            AppError::InternalServerError("argon2 exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
    }

    #[tokio::test]
    async fn test_record_not_found_maps_to_404() {
        let response = AppError::from(DbErr::RecordNotUpdated).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Resource not found");
    }

    #[tokio::test]
    async fn test_query_construction_maps_to_500() {
        let response = AppError::from(DbErr::Type("bad column".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["message"], "Internal server error");
    }

    #[test]
    fn test_error_envelope_is_attached_as_extension() {
        let response = AppError::Conflict("Resource already exists".to_string()).into_response();
        let envelope = response.extensions().get::<ErrorEnvelope>().unwrap();
        assert_eq!(envelope.status_code, 409);
        assert_eq!(envelope.message, "Resource already exists");
    }
}
