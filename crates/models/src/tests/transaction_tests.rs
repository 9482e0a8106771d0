use crate::directory::{user, user_details::{self, DetailsPatch}};
use sea_orm::{EntityTrait, PaginatorTrait, TransactionTrait};
use anyhow::Result;

/// Rolled back work leaves no rows behind
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let db = super::directory_db().await?;

    let txn = db.begin().await?;
    user::create(&txn, "tx@example.com", "tx", "hash".into()).await?;
    txn.rollback().await?;

    assert_eq!(user::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Committed work is visible afterwards
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let db = super::directory_db().await?;

    let txn = db.begin().await?;
    let u = user::create(&txn, "ok@example.com", "ok", "hash".into()).await?;
    txn.commit().await?;

    assert!(user::find(&db, u.id).await?.is_some());
    Ok(())
}

/// The foreign key removes details together with their owner
#[tokio::test]
async fn test_fk_cascade_on_user_delete() -> Result<()> {
    let db = super::directory_db().await?;
    let u = user::create(&db, "fk@example.com", "fk", "hash".into()).await?;
    user_details::create(&db, u.id, &DetailsPatch::default()).await?;

    assert!(user::delete(&db, u.id).await?);
    assert!(user_details::find_by_user(&db, u.id).await?.is_none());
    assert_eq!(user_details::Entity::find().count(&db).await?, 0);
    Ok(())
}

/// Details cannot point at a missing user
#[tokio::test]
async fn test_details_require_owner() -> Result<()> {
    let db = super::directory_db().await?;
    let res = user_details::create(&db, 4242, &DetailsPatch::default()).await;
    assert!(res.is_err());
    Ok(())
}
