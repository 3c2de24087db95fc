use axum::{extract::OriginalUri, http::Method};

use super::AppError;

/// Router fallback for unmatched routes.
pub async fn not_found(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("Cannot {} {}", method, uri.path()))
}
