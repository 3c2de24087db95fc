use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorEnvelope)
    ),
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User account registration, lookup, update and soft deletion"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = "/users", api = domain_users::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_paths_are_nested() {
        let doc = ApiDoc::openapi();
        let paths: Vec<_> = doc.paths.paths.keys().cloned().collect();

        assert!(paths.iter().any(|p| p == "/users"));
        assert!(paths.iter().any(|p| p == "/users/{id}"));
        assert!(paths.iter().any(|p| p == "/users/by-email"));
    }
}
