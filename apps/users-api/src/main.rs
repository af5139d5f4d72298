//! Users API - REST server for the users resource

use axum_helpers::server::{close_postgres, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::InMemoryUserRepository;
use eyre::WrapErr;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use migration::Migrator;
use state::{AppState, Storage};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics();

    info!(
        app = config.app.name,
        version = config.app.version,
        storage = %config.storage,
        "Starting Users API"
    );

    let storage = match &config.database {
        Some(database) => {
            let db = database::postgres::connect_from_config_with_retry(database.clone(), None)
                .await
                .wrap_err("PostgreSQL connection failed")?;

            if config.run_migrations {
                database::postgres::run_migrations::<Migrator>(&db, config.app.name)
                    .await
                    .wrap_err("Database migrations failed")?;
            }

            Storage::Postgres(db)
        }
        None => {
            tracing::warn!("Using in-memory storage; users are lost on restart");
            Storage::Memory(InMemoryUserRepository::new())
        }
    };

    let state = AppState { config, storage };
    let app = api::app(state.clone()).await?;

    let db = state.db().cloned();
    create_production_app(
        app,
        &state.config.server,
        Duration::from_secs(30),
        async move {
            if let Some(db) = db {
                close_postgres(db, "main").await;
            }
        },
    )
    .await
    .wrap_err("Server error")?;

    info!("Users API shutdown complete");
    Ok(())
}
