//! JSON extractor with validation using the validator crate.

use crate::errors::AppError;
use axum::extract::{
    FromRequest, Json, Request,
    rejection::{JsonDataError, JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON extractor that runs `Validate` on the payload.
///
/// Malformed bodies reject with the JSON rejection's status and text. A field
/// of the wrong type and invalid payloads reject with `400 Validation failed`
/// and the messages grouped by field.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateUser {
///     #[validate(email(message = "must be an email"))]
///     email: String,
/// }
///
/// async fn create_user(ValidatedJson(payload): ValidatedJson<CreateUser>) -> String {
///     payload.email
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = match Json::<T>::from_request(req, state).await {
            Ok(json) => json,
            Err(JsonRejection::JsonDataError(e)) => {
                return Err(match field_type_message(&e) {
                    Some(message) => AppError::Validation(vec![message]),
                    None => JsonRejection::JsonDataError(e).into(),
                });
            }
            Err(rejection) => return Err(rejection.into()),
        };
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}

/// `"password must be a string"` for a body like `{"password": 12345678}`.
///
/// `None` when the error is not tied to a named field.
fn field_type_message(error: &JsonDataError) -> Option<String> {
    let text = error.body_text();
    let detail = text.split_once("target type: ")?.1;
    let (field, reason) = detail.split_once(": ")?;

    if field.is_empty() || field == "." || field.contains(' ') {
        return None;
    }

    let reason = reason.split(" at line ").next().unwrap_or(reason);
    let message = match reason.split_once(", expected ") {
        Some((_, expected)) => format!("{} must be {}", field, expected),
        None => format!("{} is invalid", field),
    };

    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http, http::StatusCode, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use serde_json::Value;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    #[serde(rename_all = "camelCase")]
    struct Signup {
        #[validate(email(message = "email must be an email"))]
        email: String,
        #[validate(length(min = 8, message = "password must be longer than or equal to 8 characters"))]
        password: String,
        #[serde(default)]
        first_name: Option<String>,
    }

    async fn signup(ValidatedJson(input): ValidatedJson<Signup>) -> String {
        input.first_name.unwrap_or(input.email)
    }

    async fn post_json(body: &'static str) -> (StatusCode, Value) {
        let app = Router::new().route("/signup", post(signup));
        let request = http::Request::builder()
            .method("POST")
            .uri("/signup")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_grouped_validation_error() {
        let (status, body) =
            post_json(r#"{"email":"ada@example.com","password":12345678}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Validation failed");
        assert_eq!(body["errors"]["password"][0], "password must be a string");
    }

    #[tokio::test]
    async fn test_null_field_is_grouped_validation_error() {
        let (status, body) = post_json(r#"{"email":null,"password":"long-enough"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["email"][0], "email must be a string");
        assert!(!body["errors"]["email"][0].as_str().unwrap().contains("line"));
    }

    #[tokio::test]
    async fn test_validation_rules_still_apply() {
        let (status, body) = post_json(r#"{"email":"nope","password":"short"}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"]["email"][0], "email must be an email");
        assert_eq!(
            body["errors"]["password"][0],
            "password must be longer than or equal to 8 characters"
        );
    }

    #[tokio::test]
    async fn test_syntax_error_keeps_rejection_status() {
        let (status, body) = post_json(r#"{"email":"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["errors"].is_null());
    }
}
