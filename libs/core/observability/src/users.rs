//! Metrics for the users resource.

use metrics::{counter, gauge};

/// User metrics recorder
pub struct UserMetrics;

impl UserMetrics {
    /// Count one user operation.
    ///
    /// `operation` is one of list/create/get/update/delete; `outcome` is
    /// success, not_found, invalid or error.
    pub fn record_operation(operation: &'static str, outcome: &'static str) {
        counter!(
            "user_operations_total",
            "operation" => operation,
            "outcome" => outcome
        )
        .increment(1);
    }

    pub fn record_created() {
        Self::record_operation("create", "success");
    }

    pub fn record_updated() {
        Self::record_operation("update", "success");
    }

    pub fn record_deleted() {
        Self::record_operation("delete", "success");
    }

    pub fn record_not_found(operation: &'static str) {
        Self::record_operation(operation, "not_found");
    }

    pub fn record_invalid(operation: &'static str) {
        Self::record_operation(operation, "invalid");
    }

    pub fn record_error(operation: &'static str) {
        Self::record_operation(operation, "error");
    }

    /// Publish the current collection size
    pub fn set_users_count(count: usize) {
        gauge!("users_total").set(count as f64);
    }
}
