//! Translation of SeaORM errors into HTTP status and message.

use super::ErrorCode;
use axum::http::StatusCode;
use sea_orm::{DbErr, SqlErr};

/// How a database error should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    UniqueViolation,
    ForeignKeyViolation,
    RecordNotFound,
    /// Malformed query or model conversion. Never the client's fault.
    QueryConstruction,
    Other,
}

impl DbErrorKind {
    pub fn error_code(self) -> ErrorCode {
        match self {
            Self::UniqueViolation => ErrorCode::DatabaseUniqueViolation,
            Self::ForeignKeyViolation => ErrorCode::DatabaseForeignKeyViolation,
            Self::RecordNotFound => ErrorCode::DatabaseNotFound,
            Self::QueryConstruction => ErrorCode::DatabaseQueryConstruction,
            Self::Other => ErrorCode::DatabaseUnhandled,
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            Self::UniqueViolation => StatusCode::CONFLICT,
            Self::ForeignKeyViolation => StatusCode::BAD_REQUEST,
            Self::RecordNotFound => StatusCode::NOT_FOUND,
            Self::QueryConstruction | Self::Other => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub fn classify_db_error(error: &DbErr) -> DbErrorKind {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => return DbErrorKind::UniqueViolation,
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            return DbErrorKind::ForeignKeyViolation;
        }
        _ => {}
    }

    match error {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => DbErrorKind::RecordNotFound,
        DbErr::Type(_)
        | DbErr::Json(_)
        | DbErr::AttrNotSet(_)
        | DbErr::ConvertFromU64(_)
        | DbErr::TryIntoErr { .. }
        | DbErr::UnpackInsertId
        | DbErr::UpdateGetPrimaryKey
        | DbErr::RecordNotInserted => DbErrorKind::QueryConstruction,
        _ => DbErrorKind::Other,
    }
}

/// Status and client-facing message for a database error, logging as appropriate.
pub(crate) fn map_db_error(error: &DbErr) -> (StatusCode, &'static str, ErrorCode) {
    let kind = classify_db_error(error);
    let code = kind.error_code();

    match kind {
        DbErrorKind::UniqueViolation
        | DbErrorKind::ForeignKeyViolation
        | DbErrorKind::RecordNotFound => {
            tracing::info!(error_code = code.code(), "Database rejected request: {}", error);
        }
        DbErrorKind::QueryConstruction => {
            tracing::error!(
                error_code = code.code(),
                "Query construction failed, this is a bug: {:?}",
                error
            );
        }
        DbErrorKind::Other => {
            tracing::error!(error_code = code.code(), "Unhandled database error: {:?}", error);
        }
    }

    (kind.status(), code.default_message(), code)
}
