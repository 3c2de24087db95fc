use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

use crate::state::AppState;

/// Wire the Postgres repository into the users service and router.
pub fn router(state: &AppState) -> Router {
    let repository = PgUserRepository::new(state.db.clone());
    let service = UserService::new(repository);

    handlers::router(service)
}
