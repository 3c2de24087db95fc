use super::ErrorEnvelope;
use crate::errors::ErrorCode;
use axum::{
    body::Body,
    extract::{OriginalUri, Request},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

/// Upper bound on error bodies read back from the framework.
const MAX_ERROR_BODY: usize = 64 * 1024;

/// Global exception filter.
///
/// Every 4xx/5xx response leaves as an [`ErrorEnvelope`] carrying the request
/// path. Responses built from `AppError` already carry the envelope as an
/// extension; anything else (extractor rejections, unmatched routes, wrong
/// methods, timeouts) is converted here using the body's `message`, the body
/// text, or the canonical reason phrase, in that order.
pub async fn exception_filter(request: Request, next: Next) -> Response {
    let path = request
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let response = next.run(request).await;
    let status = response.status();

    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();

    let envelope = match parts.extensions.remove::<ErrorEnvelope>() {
        Some(envelope) => envelope,
        None => {
            let message = message_from_body(body, status).await;
            log_framework_error(status, &path, &message);
            ErrorEnvelope::new(status, message, None)
        }
    };

    let mut rebuilt = envelope.with_path(path).into_response();
    *rebuilt.status_mut() = status;

    // Keep headers such as `allow` on 405 or `www-authenticate` on 401.
    for (name, value) in parts.headers.iter() {
        if name != header::CONTENT_TYPE && name != header::CONTENT_LENGTH {
            rebuilt.headers_mut().append(name.clone(), value.clone());
        }
    }
    rebuilt.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    rebuilt
}

async fn message_from_body(body: Body, status: StatusCode) -> String {
    let fallback = || status.canonical_reason().unwrap_or("Error").to_string();

    let Ok(bytes) = axum::body::to_bytes(body, MAX_ERROR_BODY).await else {
        return fallback();
    };

    if let Ok(Value::Object(map)) = serde_json::from_slice::<Value>(&bytes) {
        if let Some(Value::String(message)) = map.get("message") {
            return message.clone();
        }
    }

    match std::str::from_utf8(&bytes).map(str::trim) {
        Ok(text) if !text.is_empty() => text.to_string(),
        _ => fallback(),
    }
}

fn log_framework_error(status: StatusCode, path: &str, message: &str) {
    if status.is_server_error() {
        tracing::error!(
            error_code = ErrorCode::InternalError.code(),
            %status,
            path,
            "Unhandled server error: {}",
            message
        );
    } else {
        tracing::info!(
            error_code = ErrorCode::HttpRejection.code(),
            %status,
            path,
            "Request rejected: {}",
            message
        );
    }
}
