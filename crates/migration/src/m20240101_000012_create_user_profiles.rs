//! Create `user_profiles` table with a unique FK to `users`.
//!
//! At most one profile per user; removed together with its owner.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(pk_auto(UserProfiles::Id))
                    .col(integer(UserProfiles::UserId).unique_key())
                    .col(string_null(UserProfiles::Interests))
                    .col(string_null(UserProfiles::About))
                    .col(string_null(UserProfiles::Address))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_profiles_user")
                            .from(UserProfiles::Table, UserProfiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserProfiles::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserProfiles { Table, Id, UserId, Interests, About, Address }

#[derive(DeriveIden)]
enum Users { Table, Id }
