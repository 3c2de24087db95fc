//! Error codes attached to error logs.
//!
//! Codes never reach the client; they exist so log aggregation can group
//! failures without parsing messages.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::DatabaseUniqueViolation;
//! assert_eq!(code.as_str(), "DATABASE_UNIQUE_VIOLATION");
//! assert_eq!(code.code(), 2001);
//! assert_eq!(code.default_message(), "Resource already exists");
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1999)
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    NotFound,
    Unauthorized,
    Forbidden,
    Conflict,
    UnprocessableEntity,
    BadRequest,
    /// Any other 4xx produced by the framework (unknown route, wrong method)
    HttpRejection,

    // Database errors (2000-2999)
    DatabaseUniqueViolation,
    DatabaseForeignKeyViolation,
    DatabaseNotFound,
    /// The query itself was malformed; always a bug on our side
    DatabaseQueryConstruction,
    DatabaseUnhandled,

    // Internal errors (5000-5999)
    InternalError,
    ServiceUnavailable,
    SerdeJsonError,
    Panic,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::JsonExtraction => "JSON_EXTRACTION",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::Conflict => "CONFLICT",
            Self::UnprocessableEntity => "UNPROCESSABLE_ENTITY",
            Self::BadRequest => "BAD_REQUEST",
            Self::HttpRejection => "HTTP_REJECTION",
            Self::DatabaseUniqueViolation => "DATABASE_UNIQUE_VIOLATION",
            Self::DatabaseForeignKeyViolation => "DATABASE_FOREIGN_KEY_VIOLATION",
            Self::DatabaseNotFound => "DATABASE_NOT_FOUND",
            Self::DatabaseQueryConstruction => "DATABASE_QUERY_CONSTRUCTION",
            Self::DatabaseUnhandled => "DATABASE_UNHANDLED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::SerdeJsonError => "SERDE_JSON_ERROR",
            Self::Panic => "PANIC",
        }
    }

    /// Integer code for structured logs.
    ///
    /// - 1000-1999: client errors
    /// - 2000-2999: database errors
    /// - 5000-5999: internal errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::JsonExtraction => 1003,
            Self::NotFound => 1004,
            Self::Unauthorized => 1006,
            Self::Forbidden => 1007,
            Self::Conflict => 1008,
            Self::UnprocessableEntity => 1009,
            Self::BadRequest => 1010,
            Self::HttpRejection => 1011,

            Self::DatabaseUniqueViolation => 2001,
            Self::DatabaseForeignKeyViolation => 2002,
            Self::DatabaseNotFound => 2003,
            Self::DatabaseQueryConstruction => 2004,
            Self::DatabaseUnhandled => 2099,

            Self::InternalError => 5001,
            Self::ServiceUnavailable => 5002,
            Self::SerdeJsonError => 5003,
            Self::Panic => 5004,
        }
    }

    /// Message shown to the client when nothing more specific is available.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::JsonExtraction => "Failed to parse request body",
            Self::NotFound => "Resource not found",
            Self::Unauthorized => "Authentication required",
            Self::Forbidden => "Access forbidden",
            Self::Conflict => "Resource already exists",
            Self::UnprocessableEntity => "Request cannot be processed",
            Self::BadRequest => "Bad request",
            Self::HttpRejection => "Request rejected",
            Self::DatabaseUniqueViolation => "Resource already exists",
            Self::DatabaseForeignKeyViolation => "Invalid reference to a related resource",
            Self::DatabaseNotFound => "Resource not found",
            Self::DatabaseQueryConstruction
            | Self::DatabaseUnhandled
            | Self::InternalError
            | Self::SerdeJsonError
            | Self::Panic => "Internal server error",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
