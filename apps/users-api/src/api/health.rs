//! Readiness check against the active storage backend.

use crate::state::{AppState, Storage};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use axum_helpers::server::{HealthCheckFuture, run_health_checks};

/// Ready when the database answers `SELECT 1`.
///
/// The in-memory backend has nothing to check and is always ready.
pub async fn ready_handler(State(state): State<AppState>) -> Response {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Storage::Postgres(db) = &state.storage {
        let check: HealthCheckFuture<'_> = Box::pin(async move {
            database::postgres::check_health(db)
                .await
                .map_err(|e| e.to_string())
        });
        checks.push(("database", check));
    }

    match run_health_checks(checks).await {
        Ok((status, json)) => (status, json).into_response(),
        Err((status, json)) => (status, json).into_response(),
    }
}
