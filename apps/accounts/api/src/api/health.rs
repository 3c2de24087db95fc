//! Readiness probe with a real database check.

use crate::state::AppState;
use axum::{Json, extract::State};
use axum_helpers::{
    AppError,
    server::{HealthCheckFuture, run_health_checks},
};
use serde_json::Value;

/// Returns `{"status": "ready", "database": "connected"}` in the success
/// envelope, or a `503` error envelope when Postgres is unreachable.
pub async fn ready_handler(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
        "database",
        Box::pin(async {
            database::postgres::check_health(&state.db)
                .await
                .map_err(|e| e.to_string())
        }),
    )];

    run_health_checks(checks).await
}
