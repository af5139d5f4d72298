/// Error type for connector-level database operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
