//! Create `user_details` table with a unique FK to `users`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserDetails::Table)
                    .if_not_exists()
                    .col(pk_auto(UserDetails::Id))
                    .col(integer(UserDetails::UserId).unique_key())
                    .col(string_len_null(UserDetails::FirstName, 100))
                    .col(string_len_null(UserDetails::LastName, 100))
                    .col(string_len_null(UserDetails::Phone, 32))
                    .col(string_null(UserDetails::Address))
                    .col(text_null(UserDetails::Bio))
                    .col(timestamp_with_time_zone(UserDetails::CreatedAt))
                    .col(timestamp_with_time_zone(UserDetails::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_details_user")
                            .from(UserDetails::Table, UserDetails::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(UserDetails::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum UserDetails { Table, Id, UserId, FirstName, LastName, Phone, Address, Bio, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Users { Table, Id }
