//! PostgreSQL connector, migrations runner, health checks and a base repository

mod config;
mod connector;
mod health;
mod repository;

pub use config::PostgresConfig;
pub use connector::{
    connect_from_config, connect_from_config_with_retry, connect_with_options,
    run_migrations,
};
pub use health::check_health;
pub use repository::BaseRepository;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
pub use sea_orm_migration::MigratorTrait;
