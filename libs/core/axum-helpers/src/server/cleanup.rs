//! Connection cleanup run during graceful shutdown.

use tracing::{error, info};

/// Close a SeaORM connection pool, logging the outcome.
pub async fn close_postgres(db: sea_orm::DatabaseConnection, name: &str) {
    match db.close().await {
        Ok(_) => info!(connection = name, "PostgreSQL connection closed"),
        Err(e) => error!(connection = name, "Error closing PostgreSQL connection: {}", e),
    }
}
