use sea_orm::DatabaseConnection;
use migration::MigratorTrait;

use crate::db::connect_in_memory;



/// Transaction handling and cascade tests
pub mod transaction_tests;

pub async fn library_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::LibraryMigrator::up(&db, None).await?;
    Ok(db)
}

pub async fn profiles_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::ProfilesMigrator::up(&db, None).await?;
    Ok(db)
}

pub async fn directory_db() -> anyhow::Result<DatabaseConnection> {
    let db = connect_in_memory().await?;
    migration::DirectoryMigrator::up(&db, None).await?;
    Ok(db)
}
