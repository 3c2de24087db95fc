//! Uniform response envelopes.
//!
//! Successful responses are wrapped as
//!
//! ```json
//! { "success": true, "data": { ... }, "timestamp": "2024-01-01T00:00:00.000Z" }
//! ```
//!
//! and every error, whatever produced it, leaves as
//!
//! ```json
//! { "success": false, "statusCode": 404, "message": "...", "errors": null,
//!   "timestamp": "2024-01-01T00:00:00.000Z", "path": "/api/users/..." }
//! ```
//!
//! [`with_envelopes`] installs both layers plus panic recovery on a router.
//! Handlers opt out of the success wrapper by returning [`Raw`]; a whole
//! router opts out with `.layer(skip_envelope_layer())`.

pub mod filter;
pub mod success;

pub use filter::exception_filter;
pub use success::{Raw, SkipEnvelope, skip_envelope, skip_envelope_layer, wrap_success};

use crate::errors::{AppError, ErrorCode};
use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::BTreeMap;
use tower_http::catch_panic::CatchPanicLayer;
use utoipa::ToSchema;

/// Current time as RFC 3339 UTC with millisecond precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    /// Always `false`
    pub success: bool,
    pub status_code: u16,
    pub message: String,
    /// Validation messages grouped by field; `null` for other errors
    pub errors: Option<BTreeMap<String, Vec<String>>>,
    pub timestamp: String,
    /// Request path, filled in by [`exception_filter`]
    pub path: String,
}

impl ErrorEnvelope {
    pub fn new(
        status: StatusCode,
        message: impl Into<String>,
        errors: Option<BTreeMap<String, Vec<String>>>,
    ) -> Self {
        Self {
            success: false,
            status_code: status.as_u16(),
            message: message.into(),
            errors,
            timestamp: timestamp(),
            path: String::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ErrorEnvelope {
    fn into_response(self) -> Response {
        let status = self.status();
        let mut response = (status, Json(&self)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

/// Body of every successful response that did not opt out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    /// Always `true`
    pub success: bool,
    pub data: T,
    pub timestamp: String,
}

impl<T> SuccessEnvelope<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: timestamp(),
        }
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");

    tracing::error!(error_code = ErrorCode::Panic.code(), "Handler panicked: {}", detail);
    AppError::InternalServerError(format!("handler panicked: {}", detail)).into_response()
}

/// Applies panic recovery, the success envelope and the exception filter,
/// innermost to outermost.
pub fn with_envelopes<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(wrap_success))
        .layer(middleware::from_fn(exception_filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert!(ts.ends_with('Z'));
        // 2024-01-01T00:00:00.000Z
        assert_eq!(ts.len(), 24);
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[test]
    fn test_error_envelope_serializes_camel_case() {
        let envelope = ErrorEnvelope::new(StatusCode::CONFLICT, "Resource already exists", None)
            .with_path("/api/users");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["statusCode"], 409);
        assert_eq!(json["path"], "/api/users");
        assert!(json["errors"].is_null());
        assert!(json.get("status_code").is_none());
    }

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(SuccessEnvelope::new(vec![1, 2])).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_panic_payloads() {
        let response = panic_response(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = panic_response(Box::new(String::from("boom")));
        let envelope = response.extensions().get::<ErrorEnvelope>().unwrap();
        assert_eq!(envelope.message, "Internal server error");
    }
}
