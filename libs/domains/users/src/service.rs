use std::sync::Arc;

use observability::UserMetrics;

use crate::error::{UserError, UserResult};
use crate::models::{User, UserArgs};
use crate::repository::UserRepository;

/// Service layer for User business logic
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// List every user, ascending by id
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        let users = self
            .repository
            .list_all()
            .await
            .inspect_err(|e| record_failure("list", e))?;

        UserMetrics::record_operation("list", "success");
        UserMetrics::set_users_count(users.len());
        Ok(users)
    }

    /// Create a user and return the full collection afterwards
    pub async fn create_user(&self, args: UserArgs) -> UserResult<Vec<User>> {
        let new_user = args
            .into_new_user()
            .map_err(UserError::from)
            .inspect_err(|e| record_failure("create", e))?;

        self.repository
            .insert(new_user)
            .await
            .inspect_err(|e| record_failure("create", e))?;
        UserMetrics::record_created();

        self.list_users().await
    }

    pub async fn get_user(&self, id: i64) -> UserResult<User> {
        let key = storage_key(id).inspect_err(|e| record_failure("get", e))?;
        let user = self
            .repository
            .get_by_id(key)
            .await
            .and_then(|user| user.ok_or(UserError::NotFound(id)))
            .inspect_err(|e| record_failure("get", e))?;

        UserMetrics::record_operation("get", "success");
        Ok(user)
    }

    /// Replace both fields of a user.
    ///
    /// Arguments are validated before the lookup, so a missing field wins
    /// over an unknown id.
    pub async fn update_user(&self, id: i64, args: UserArgs) -> UserResult<User> {
        let new_user = args
            .into_new_user()
            .map_err(UserError::from)
            .inspect_err(|e| record_failure("update", e))?;

        let key = storage_key(id).inspect_err(|e| record_failure("update", e))?;
        let user = self
            .repository
            .update(key, new_user)
            .await
            .and_then(|user| user.ok_or(UserError::NotFound(id)))
            .inspect_err(|e| record_failure("update", e))?;

        UserMetrics::record_updated();
        Ok(user)
    }

    /// Delete a user and return the remaining collection.
    ///
    /// `name` and `email` must be present but are not compared with the
    /// stored row.
    pub async fn delete_user(&self, id: i64, args: UserArgs) -> UserResult<Vec<User>> {
        args.into_new_user()
            .map_err(UserError::from)
            .inspect_err(|e| record_failure("delete", e))?;

        let key = storage_key(id).inspect_err(|e| record_failure("delete", e))?;
        let deleted = self
            .repository
            .delete_by_id(key)
            .await
            .inspect_err(|e| record_failure("delete", e))?;
        if !deleted {
            let err = UserError::NotFound(id);
            record_failure("delete", &err);
            return Err(err);
        }
        UserMetrics::record_deleted();

        self.list_users().await
    }
}

/// Ids outside the `i32` key space can never be stored.
fn storage_key(id: i64) -> UserResult<i32> {
    i32::try_from(id).map_err(|_| UserError::NotFound(id))
}

fn record_failure(operation: &'static str, err: &UserError) {
    match err {
        UserError::NotFound(id) => {
            tracing::debug!(operation, user_id = id, "User not found");
            UserMetrics::record_not_found(operation);
        }
        UserError::Validation(errors) => {
            tracing::debug!(operation, %errors, "Rejected user arguments");
            UserMetrics::record_invalid(operation);
        }
        UserError::Storage(msg) => {
            tracing::error!(operation, error = %msg, "User storage failure");
            UserMetrics::record_error(operation);
        }
    }
}
