use sea_orm::{DatabaseConnection, EntityTrait, TransactionTrait};

use models::profiles::{user, user_profile::{self, ProfilePatch}};

use crate::accounts::domain::{AccountUser, Credentials, UserWithProfile};
use crate::accounts::repository::AccountRepository;
use crate::errors::ServiceError;

/// SeaORM-backed repository; one pool handle per service process.
#[derive(Clone)]
pub struct SeaOrmAccountRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmAccountRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl AccountRepository for SeaOrmAccountRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AccountUser>, ServiceError> {
        let res = user::find_by_email(&self.db, email).await?;
        Ok(res.map(Into::into))
    }

    async fn create_user(&self, email: &str, name: &str, password_hash: String) -> Result<AccountUser, ServiceError> {
        let created = user::create(&self.db, email, name, password_hash)
            .await
            .map_err(|e| match e {
                models::errors::ModelError::Conflict(_) => ServiceError::conflict("Email already registered"),
                other => other.into(),
            })?;
        Ok(created.into())
    }

    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, ServiceError> {
        let res = user::Entity::find_by_id(user_id).one(&self.db).await?;
        Ok(res.map(|u| Credentials { user_id: u.id, password_hash: u.password_hash }))
    }

    async fn find_user_with_profile(&self, user_id: i32) -> Result<Option<UserWithProfile>, ServiceError> {
        let res = user::find_with_profile(&self.db, user_id).await?;
        Ok(res.map(|(u, p)| UserWithProfile::from_rows(u, p)))
    }

    async fn upsert_profile(&self, user_id: i32, patch: &ProfilePatch) -> Result<Option<UserWithProfile>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(owner) = user::Entity::find_by_id(user_id).one(&txn).await? else {
            return Ok(None);
        };
        let profile = user_profile::upsert(&txn, user_id, patch).await?;
        txn.commit().await?;
        Ok(Some(UserWithProfile::from_rows(owner, Some(profile))))
    }
}
