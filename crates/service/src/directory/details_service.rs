use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use models::directory::{user, user_details};

use super::domain::{DetailsPatch, UserDetails};
use crate::errors::ServiceError;

const USER_NOT_FOUND: &str = "User not found";
const DETAILS_NOT_FOUND: &str = "User details not found";

/// Create the details row for an existing user; at most one per user.
#[instrument(skip(db, patch))]
pub async fn create_details(db: &DatabaseConnection, user_id: i32, patch: DetailsPatch) -> Result<UserDetails, ServiceError> {
    let txn = db.begin().await?;
    if user::find(&txn, user_id).await?.is_none() {
        return Err(ServiceError::not_found(USER_NOT_FOUND));
    }
    if user_details::find_by_user(&txn, user_id).await?.is_some() {
        return Err(ServiceError::conflict("User details already exist"));
    }
    let created = user_details::create(&txn, user_id, &patch).await?;
    txn.commit().await?;
    info!(user_id, "details_created");
    Ok(created)
}

pub async fn get_details(db: &DatabaseConnection, user_id: i32) -> Result<Option<UserDetails>, ServiceError> {
    Ok(user_details::find_by_user(db, user_id).await?)
}

/// Partial update: untouched fields keep their value, `null` clears.
#[instrument(skip(db, patch))]
pub async fn update_details(db: &DatabaseConnection, user_id: i32, patch: DetailsPatch) -> Result<UserDetails, ServiceError> {
    let txn = db.begin().await?;
    let existing = user_details::find_by_user(&txn, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found(DETAILS_NOT_FOUND))?;
    let updated = user_details::update(&txn, existing, &patch).await?;
    txn.commit().await?;
    info!(user_id, "details_updated");
    Ok(updated)
}

/// Returns false when the user has no details.
#[instrument(skip(db))]
pub async fn delete_details(db: &DatabaseConnection, user_id: i32) -> Result<bool, ServiceError> {
    let txn = db.begin().await?;
    let deleted = user_details::delete_by_user(&txn, user_id).await?;
    txn.commit().await?;
    if deleted {
        info!(user_id, "details_deleted");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::domain::NewUser;
    use crate::directory::user_service::{create_user, delete_user, get_user};
    use crate::test_support::directory_db;

    async fn seeded() -> Result<(DatabaseConnection, i32), anyhow::Error> {
        let db = directory_db().await?;
        let u = create_user(
            &db,
            NewUser { email: "kim@example.com".into(), username: "kim".into(), password: "Passw0rd!".into() },
        )
        .await?;
        Ok((db, u.id))
    }

    fn patch(json: &str) -> DetailsPatch {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn bio_only_update_keeps_other_fields() -> Result<(), anyhow::Error> {
        let (db, uid) = seeded().await?;
        create_details(&db, uid, patch(r#"{"first_name": "Kim", "last_name": "Lee", "phone": "555"}"#)).await?;

        let updated = update_details(&db, uid, patch(r#"{"bio": "hello"}"#)).await?;
        assert_eq!(updated.first_name.as_deref(), Some("Kim"));
        assert_eq!(updated.last_name.as_deref(), Some("Lee"));
        assert_eq!(updated.phone.as_deref(), Some("555"));
        assert_eq!(updated.bio.as_deref(), Some("hello"));
        Ok(())
    }

    #[tokio::test]
    async fn explicit_null_clears_a_field() -> Result<(), anyhow::Error> {
        let (db, uid) = seeded().await?;
        create_details(&db, uid, patch(r#"{"phone": "555", "address": "Main St"}"#)).await?;
        let updated = update_details(&db, uid, patch(r#"{"phone": null}"#)).await?;
        assert_eq!(updated.phone, None);
        assert_eq!(updated.address.as_deref(), Some("Main St"));
        Ok(())
    }

    #[tokio::test]
    async fn second_create_is_conflict() -> Result<(), anyhow::Error> {
        let (db, uid) = seeded().await?;
        create_details(&db, uid, DetailsPatch::default()).await?;
        let err = create_details(&db, uid, DetailsPatch::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "User details already exist");
        Ok(())
    }

    #[tokio::test]
    async fn missing_user_or_details_is_not_found() -> Result<(), anyhow::Error> {
        let (db, uid) = seeded().await?;
        let err = create_details(&db, uid + 1, DetailsPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == USER_NOT_FOUND));

        let err = update_details(&db, uid, DetailsPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(ref m) if m == DETAILS_NOT_FOUND));
        assert!(get_details(&db, uid).await?.is_none());
        assert!(!delete_details(&db, uid).await?);
        Ok(())
    }

    #[tokio::test]
    async fn deleting_user_removes_details() -> Result<(), anyhow::Error> {
        let (db, uid) = seeded().await?;
        create_details(&db, uid, patch(r#"{"bio": "bye"}"#)).await?;
        assert!(get_user(&db, uid).await?.unwrap().details.is_some());

        assert!(delete_user(&db, uid).await?);
        assert!(get_details(&db, uid).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn details_can_be_deleted_alone() -> Result<(), anyhow::Error> {
        let (db, uid) = seeded().await?;
        create_details(&db, uid, DetailsPatch::default()).await?;
        assert!(delete_details(&db, uid).await?);
        assert!(get_user(&db, uid).await?.unwrap().details.is_none());
        Ok(())
    }
}
