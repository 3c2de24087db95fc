//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! ## Modules
//!
//! - **[`envelope`]**: success/error response envelopes, panic recovery
//! - **[`errors`]**: `AppError`, error codes, database and validation error mapping
//! - **[`extractors`]**: UUID path and validated JSON extractors
//! - **[`http`]**: CORS and security header middleware
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let api_routes = Router::new(); // Add your routes
//!     let probes = health_router(app_info!());
//!     let router = create_router::<ApiDoc>(api_routes, probes, &CorsConfig::default())?;
//!
//!     create_production_app(router, &ServerConfig::default(), Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod envelope;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

// Re-export envelope types
pub use envelope::{
    ErrorEnvelope, Raw, SkipEnvelope, SuccessEnvelope, skip_envelope_layer, with_envelopes,
};

// Re-export server types
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, close_postgres, create_production_app,
    create_router, health_router, run_health_checks,
    shutdown_signal,
};

// Re-export HTTP middleware
pub use http::{create_cors_layer, security_headers};

// Re-export error types
pub use errors::{AppError, DbErrorKind, ErrorCode};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};
