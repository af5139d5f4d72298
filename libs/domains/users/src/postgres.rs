use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel, QueryOrder,
};

use crate::{
    entity,
    error::UserResult,
    models::{NewUser, User},
    repository::UserRepository,
};

/// PostgreSQL-backed user repository over the `user_model` table
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn list_all(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(User::from))
    }

    async fn insert(&self, input: NewUser) -> UserResult<User> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(user_id = model.id, "Created user");
        Ok(model.into())
    }

    async fn update(&self, id: i32, input: NewUser) -> UserResult<Option<User>> {
        let Some(model) = entity::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_model = model.into_active_model();
        active_model.name = Set(input.name);
        active_model.email = Set(input.email);

        match active_model.update(&self.db).await {
            Ok(updated) => {
                tracing::info!(user_id = id, "Updated user");
                Ok(Some(updated.into()))
            }
            // row deleted between the lookup and the update
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_id(&self, id: i32) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn model(id: i32, name: &str, email: &str) -> entity::Model {
        entity::Model {
            id,
            name: name.to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_all_maps_models() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                model(1, "Alice", "a@x.com"),
                model(2, "Bob", "b@x.com"),
            ]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let users = repo.list_all().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].name, "Bob");
    }

    #[tokio::test]
    async fn test_get_by_id_missing() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(repo.get_by_id(9).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Alice", "a@x.com")]])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let user = repo.insert(NewUser::new("Alice", "a@x.com")).await.unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_insert_constraint_violation_is_storage_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "duplicate key value violates unique constraint".to_string(),
            )])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let err = repo
            .insert(NewUser::new("Alice", "a@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, UserError::Storage(_)));
    }

    #[tokio::test]
    async fn test_update_replaces_fields() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![model(1, "Alice", "a@x.com")],
                vec![model(1, "Alicia", "al@x.com")],
            ])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let updated = repo
            .update(1, NewUser::new("Alicia", "al@x.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Alicia");
        assert_eq!(updated.email, "al@x.com");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgUserRepository::new(db);

        let result = repo.update(5, NewUser::new("Ghost", "g@x.com")).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_delete_reports_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();
        let repo = PgUserRepository::new(db);

        assert!(repo.delete_by_id(1).await.unwrap());
        assert!(!repo.delete_by_id(1).await.unwrap());
    }
}
