//! One migrator per service so each SQLite file only carries its own tables.
//! Owners are created before the tables that reference them.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_book;
mod m20240101_000011_create_profile_users;
mod m20240101_000012_create_user_profiles;
mod m20240101_000021_create_directory_users;
mod m20240101_000022_create_user_details;

/// Schema for the `library` service.
pub struct LibraryMigrator;

#[async_trait::async_trait]
impl MigratorTrait for LibraryMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_book::Migration)]
    }
}

/// Schema for the `profiles` service.
pub struct ProfilesMigrator;

#[async_trait::async_trait]
impl MigratorTrait for ProfilesMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000011_create_profile_users::Migration),
            Box::new(m20240101_000012_create_user_profiles::Migration),
        ]
    }
}

/// Schema for the `directory` service.
pub struct DirectoryMigrator;

#[async_trait::async_trait]
impl MigratorTrait for DirectoryMigrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000021_create_directory_users::Migration),
            Box::new(m20240101_000022_create_user_details::Migration),
        ]
    }
}
