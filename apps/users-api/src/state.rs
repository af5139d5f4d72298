//! Application state management

use database::postgres::DatabaseConnection;
use domain_users::InMemoryUserRepository;

/// Backing store selected at startup
#[derive(Clone)]
pub enum Storage {
    Postgres(DatabaseConnection),
    Memory(InMemoryUserRepository),
}

/// Shared application state.
///
/// Cloned into every router; both storage variants are cheap handle clones.
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub storage: Storage,
}

impl AppState {
    /// The PostgreSQL pool, if that is the active backend
    pub fn db(&self) -> Option<&DatabaseConnection> {
        match &self.storage {
            Storage::Postgres(db) => Some(db),
            Storage::Memory(_) => None,
        }
    }
}
