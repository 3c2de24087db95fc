use axum::{Router, routing::get};

use crate::state::AppState;

pub mod health;
pub mod users;

/// Domain routes, nested under `/api` by `create_router`.
pub fn routes(state: &AppState) -> Router {
    Router::new().nest("/users", users::router(state))
}

/// `/ready` probe backed by a database round trip.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum_helpers::server::create_router;
    use core_config::{app_info, cors::CorsConfig, server::ServerConfig};
    use database::postgres::PostgresConfig;
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use serde_json::Value;
    use tower::ServiceExt;

    fn state(db: DatabaseConnection) -> AppState {
        AppState {
            config: Config {
                app: app_info!(),
                database: PostgresConfig::new("postgresql://localhost/accounts"),
                server: ServerConfig::new("127.0.0.1", 0),
                cors: CorsConfig::default(),
                environment: Environment::Development,
                run_migrations: false,
            },
            db,
        }
    }

    fn app(state: AppState) -> Router {
        create_router::<crate::openapi::ApiDoc>(routes(&state), ready_router(state.clone()), &state.config.cors)
            .unwrap()
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_users_are_mounted_under_api() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<domain_users::entity::Model>::new()])
            .into_connection();

        let (status, body) = get(app(state(db)), "/api/users").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_database_failure_is_500_envelope() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([sea_orm::DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let (status, body) = get(app(state(db)), "/api/users").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["statusCode"], 500);
        assert_eq!(body["path"], "/api/users");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served_raw() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let (status, body) = get(app(state(db)), "/api-docs/openapi.json").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("success").is_none());
        assert_eq!(body["info"]["title"], "Accounts API");
    }
}
