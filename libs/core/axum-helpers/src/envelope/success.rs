use super::SuccessEnvelope;
use crate::errors::AppError;
use axum::{
    Json,
    body::{Body, Bytes},
    extract::Request,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;
use tower::util::MapResponseLayer;

/// Response extension that tells [`wrap_success`] to leave the body alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkipEnvelope;

/// JSON response that bypasses the success envelope.
///
/// ```ignore
/// async fn health() -> Raw<HealthResponse> {
///     Raw(HealthResponse { status: "healthy", .. })
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Raw<T>(pub T);

impl<T: Serialize> IntoResponse for Raw<T> {
    fn into_response(self) -> Response {
        let mut response = Json(self.0).into_response();
        response.extensions_mut().insert(SkipEnvelope);
        response
    }
}

/// Marks a response as opted out.
pub fn skip_envelope(mut response: Response) -> Response {
    response.extensions_mut().insert(SkipEnvelope);
    response
}

/// Opts every route of a router out of the success envelope.
///
/// ```ignore
/// let docs = Router::new()
///     .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
///     .layer(skip_envelope_layer());
/// ```
pub fn skip_envelope_layer() -> MapResponseLayer<fn(Response) -> Response> {
    MapResponseLayer::new(skip_envelope as fn(Response) -> Response)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    Text,
    /// No content type: wrapped as `null` if empty, untouched otherwise
    Unknown,
    Other,
}

fn body_kind(headers: &HeaderMap) -> BodyKind {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return BodyKind::Unknown;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    if mime == "application/json" || mime.ends_with("+json") {
        BodyKind::Json
    } else if mime == "text/plain" {
        BodyKind::Text
    } else {
        BodyKind::Other
    }
}

/// Wraps successful JSON, text and empty responses in a [`SuccessEnvelope`].
///
/// Error responses, `204`/`304`, responses carrying [`SkipEnvelope`] and
/// bodies of any other content type pass through unchanged.
pub async fn wrap_success(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();

    if !status.is_success()
        || status == StatusCode::NO_CONTENT
        || response.extensions().get::<SkipEnvelope>().is_some()
    {
        return response;
    }

    let kind = body_kind(response.headers());
    if kind == BodyKind::Other {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return AppError::InternalServerError(format!("failed to buffer response: {}", e))
                .into_response();
        }
    };

    let data = match kind {
        _ if bytes.is_empty() => Value::Null,
        BodyKind::Json => match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Handler returned invalid JSON, passing through: {}", e);
                return Response::from_parts(parts, Body::from(bytes));
            }
        },
        BodyKind::Text => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
        BodyKind::Unknown | BodyKind::Other => {
            return Response::from_parts(parts, Body::from(bytes));
        }
    };

    let wrapped = match serde_json::to_vec(&SuccessEnvelope::new(data)) {
        Ok(body) => Bytes::from(body),
        Err(e) => return AppError::SerdeJson(e).into_response(),
    };

    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(wrapped))
}
