//! Configuration for Users API

use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::fmt;
use std::str::FromStr;

pub use core_config::Environment;

/// Where users are stored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    /// Process-local store; contents are lost on restart
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown storage backend '{other}' (expected postgres or memory)")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub storage: StorageBackend,
    /// Present only for the postgres backend
    pub database: Option<PostgresConfig>,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080
        let storage: StorageBackend = env_parse("STORAGE_BACKEND", "postgres")?;

        let database = match storage {
            StorageBackend::Postgres => Some(PostgresConfig::from_env()?), // DATABASE_URL required
            StorageBackend::Memory => None,
        };

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            storage,
            database,
            run_migrations: env_parse("RUN_MIGRATIONS", "true")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_backend_needs_no_database_url() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", Some("memory")),
                ("DATABASE_URL", None),
                ("PORT", Some("9000")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.storage, StorageBackend::Memory);
                assert!(config.database.is_none());
                assert_eq!(config.server.port, 9000);
                assert_eq!(config.app.name, "users_api");
            },
        );
    }

    #[test]
    fn test_postgres_backend_is_default_and_requires_url() {
        temp_env::with_vars(
            [("STORAGE_BACKEND", None::<&str>), ("DATABASE_URL", None)],
            || {
                let err = Config::from_env().unwrap_err();
                assert!(err.to_string().contains("DATABASE_URL"));
            },
        );
    }

    #[test]
    fn test_postgres_backend_loads_pool_config() {
        temp_env::with_vars(
            [
                ("STORAGE_BACKEND", Some("postgres")),
                ("DATABASE_URL", Some("postgresql://localhost/users")),
                ("RUN_MIGRATIONS", Some("false")),
            ],
            || {
                let config = Config::from_env().unwrap();
                let database = config.database.unwrap();
                assert_eq!(database.url(), "postgresql://localhost/users");
                assert!(!config.run_migrations);
            },
        );
    }

    #[test]
    fn test_unknown_backend_rejected() {
        temp_env::with_var("STORAGE_BACKEND", Some("mysql"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("STORAGE_BACKEND"));
        });
    }
}
