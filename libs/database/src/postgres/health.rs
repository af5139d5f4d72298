use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};
use tracing::debug;

use crate::common::{DatabaseError, DatabaseResult};

/// Check PostgreSQL health by executing `SELECT 1`.
///
/// Used by the readiness endpoint.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    debug!("Running PostgreSQL health check");

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1".to_owned());
    db.query_one_raw(stmt).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}
