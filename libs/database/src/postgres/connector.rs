use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry, retry_with_backoff};

/// Connect using a [`PostgresConfig`].
///
/// ```ignore
/// use core_config::FromEnv;
/// use database::postgres::{PostgresConfig, connect_from_config};
///
/// let db = connect_from_config(PostgresConfig::from_env()?).await?;
/// ```
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    connect_with_options(config.into_connect_options()).await
}

/// Connect with explicit SeaORM connection options
pub async fn connect_with_options(options: ConnectOptions) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(options).await?;
    info!("Successfully connected to PostgreSQL database");
    Ok(db)
}

/// Connect from config, retrying with exponential backoff on failure.
///
/// `None` uses the default [`RetryConfig`]. Meant for startup, where the
/// database container may still be coming up.
///
/// ```ignore
/// use database::common::RetryConfig;
/// use database::postgres::connect_from_config_with_retry;
///
/// let retry_config = RetryConfig::new().with_max_retries(5).with_initial_delay(500);
/// let db = connect_from_config_with_retry(config, Some(retry_config)).await?;
/// ```
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let options = config.into_connect_options();
    let attempt = || connect_with_options(options.clone());

    match retry_config {
        Some(retry_config) => retry_with_backoff(attempt, retry_config).await,
        None => retry(attempt).await,
    }
}

/// Apply all pending migrations of `M`.
///
/// `app_name` is only used for logging.
///
/// ```ignore
/// use database::postgres::run_migrations;
/// use migration::Migrator;
///
/// run_migrations::<Migrator>(&db, "users_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations completed successfully");
    Ok(())
}
