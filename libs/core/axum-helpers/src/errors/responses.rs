//! Reusable OpenAPI response types describing the error envelope.

use crate::envelope::ErrorEnvelope;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 500,
        "message": "Internal server error",
        "errors": null,
        "timestamp": "2024-01-01T00:00:00.000Z",
        "path": "/api/users"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 400,
        "message": "Validation failed",
        "errors": {
            "email": ["email must be an email"],
            "password": ["password must be longer than or equal to 8 characters"]
        },
        "timestamp": "2024-01-01T00:00:00.000Z",
        "path": "/api/users"
    })
)]
pub struct BadRequestValidationResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 400,
        "message": "Invalid UUID: not-a-uuid",
        "errors": null,
        "timestamp": "2024-01-01T00:00:00.000Z",
        "path": "/api/users/not-a-uuid"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 404,
        "message": "User with id 0190a8f4-8a3b-7c11-9c53-5d1a8f0b2e4f not found",
        "errors": null,
        "timestamp": "2024-01-01T00:00:00.000Z",
        "path": "/api/users/0190a8f4-8a3b-7c11-9c53-5d1a8f0b2e4f"
    })
)]
pub struct NotFoundResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Conflict - Resource already exists",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 409,
        "message": "Resource already exists",
        "errors": null,
        "timestamp": "2024-01-01T00:00:00.000Z",
        "path": "/api/users"
    })
)]
pub struct ConflictResponse(pub ErrorEnvelope);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "success": false,
        "statusCode": 503,
        "message": "Service is temporarily unavailable",
        "errors": null,
        "timestamp": "2024-01-01T00:00:00.000Z",
        "path": "/ready"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorEnvelope);
