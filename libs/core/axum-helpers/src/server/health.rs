use crate::envelope::Raw;
use crate::errors::AppError;
use axum::{Json, Router, extract::State, routing::get};
use core_config::AppInfo;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::future::Future;
use std::pin::Pin;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: &'static str,
    pub version: &'static str,
}

/// A boxed future for health checks with a string error
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Runs readiness checks concurrently.
///
/// Succeeds with `{"status": "ready", "<name>": "connected", ...}` when every
/// check passes, otherwise fails with `503` naming the failed checks.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture)> = vec![
///     ("database", Box::pin(async { check_health(&db).await.map_err(|e| e.to_string()) })),
/// ];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(
    checks: Vec<(&str, HealthCheckFuture<'_>)>,
) -> Result<Json<Value>, AppError> {
    let names: Vec<_> = checks.iter().map(|(name, _)| *name).collect();
    let results = join_all(checks.into_iter().map(|(_, check)| check)).await;

    let mut statuses = Map::new();
    let mut failed = Vec::new();

    for (name, result) in names.into_iter().zip(results) {
        match result {
            Ok(_) => {
                statuses.insert(name.to_string(), json!("connected"));
            }
            Err(e) => {
                tracing::error!(check = name, "Readiness check failed: {}", e);
                statuses.insert(name.to_string(), json!("disconnected"));
                failed.push(name);
            }
        }
    }

    if !failed.is_empty() {
        return Err(AppError::ServiceUnavailable(format!(
            "Not ready: {} unavailable",
            failed.join(", ")
        )));
    }

    statuses.insert("status".to_string(), json!("ready"));
    Ok(Json(Value::Object(statuses)))
}

/// Liveness endpoint. Always 200 while the process is serving, returned raw.
pub async fn health_handler(State(app): State<AppInfo>) -> Raw<HealthResponse> {
    Raw(HealthResponse {
        status: "healthy",
        name: app.name,
        version: app.version,
    })
}

/// Router with the `/health` endpoint.
///
/// ```ignore
/// let probes = Router::new()
///     .merge(health_router(app_info!()))
///     .merge(ready_router(state));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
