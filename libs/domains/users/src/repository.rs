use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{MAX_FIELD_LEN, NewUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ascending by id
    async fn list_all(&self) -> UserResult<Vec<User>>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Insert a user and return it with its assigned id
    async fn insert(&self, input: NewUser) -> UserResult<User>;

    /// Replace both fields of an existing user. `None` if the id is unknown.
    async fn update(&self, id: i32, input: NewUser) -> UserResult<Option<User>>;

    /// Returns whether a row was removed
    async fn delete_by_id(&self, id: i32) -> UserResult<bool>;
}

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<i32, User>,
    last_id: i32,
}

impl Store {
    /// Mirrors the `user_model` column constraints
    fn check_constraints(&self, input: &NewUser, except: Option<i32>) -> UserResult<()> {
        if input.name.chars().count() > MAX_FIELD_LEN {
            return Err(UserError::Storage(format!(
                "value too long for column name (max {MAX_FIELD_LEN})"
            )));
        }
        if input.email.chars().count() > MAX_FIELD_LEN {
            return Err(UserError::Storage(format!(
                "value too long for column email (max {MAX_FIELD_LEN})"
            )));
        }

        let others = || self.users.values().filter(|u| Some(u.id) != except);
        if others().any(|u| u.name == input.name) {
            return Err(UserError::Storage(
                "duplicate key value violates unique constraint on name".to_string(),
            ));
        }
        if others().any(|u| u.email == input.email) {
            return Err(UserError::Storage(
                "duplicate key value violates unique constraint on email".to_string(),
            ));
        }
        Ok(())
    }
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn insert(&self, input: NewUser) -> UserResult<User> {
        let mut store = self.store.write().await;
        store.check_constraints(&input, None)?;

        store.last_id += 1;
        let user = User {
            id: store.last_id,
            name: input.name,
            email: input.email,
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn update(&self, id: i32, input: NewUser) -> UserResult<Option<User>> {
        let mut store = self.store.write().await;
        if !store.users.contains_key(&id) {
            return Ok(None);
        }
        store.check_constraints(&input, Some(id))?;

        let updated = store.users.get_mut(&id).map(|user| {
            user.name = input.name;
            user.email = input.email;
            user.clone()
        });

        tracing::info!(user_id = id, "Updated user");
        Ok(updated)
    }

    async fn delete_by_id(&self, id: i32) -> UserResult<bool> {
        let mut store = self.store.write().await;

        if store.users.remove(&id).is_some() {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
