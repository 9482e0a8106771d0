#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::db::connect_in_memory;

// Each test gets its own private in-memory database, migrated from scratch.

pub async fn library_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::LibraryMigrator::up(&db, None).await?;
    Ok(db)
}

pub async fn profiles_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::ProfilesMigrator::up(&db, None).await?;
    Ok(db)
}

pub async fn directory_db() -> Result<DatabaseConnection, anyhow::Error> {
    let db = connect_in_memory().await?;
    migration::DirectoryMigrator::up(&db, None).await?;
    Ok(db)
}
