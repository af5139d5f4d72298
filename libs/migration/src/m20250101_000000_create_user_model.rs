use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserModel::Table)
                    .if_not_exists()
                    .col(pk_auto(UserModel::Id))
                    .col(
                        ColumnDef::new(UserModel::Name)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(UserModel::Email)
                            .string_len(80)
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserModel::Table).to_owned())
            .await
    }
}

/// Physical table `user_model`
#[derive(DeriveIden)]
enum UserModel {
    Table,
    Id,
    Name,
    Email,
}
