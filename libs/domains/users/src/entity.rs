use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{NewUser, User};

/// Sea-ORM Entity for the `user_model` table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_model")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for User {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            email: model.email,
        }
    }
}

// id is left NotSet so the sequence assigns it
impl From<NewUser> for ActiveModel {
    fn from(input: NewUser) -> Self {
        ActiveModel {
            name: Set(input.name),
            email: Set(input.email),
            ..Default::default()
        }
    }
}
