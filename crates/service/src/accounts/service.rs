use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use models::profiles::user_profile::ProfilePatch;
use models::validation::{validate_email, validate_password, validate_required};

use super::domain::{AccountUser, LoginInput, RegisterInput, UserWithProfile};
use super::repository::AccountRepository;
use crate::errors::ServiceError;
use crate::password::{self, ALGORITHM};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Account business service independent of web framework
pub struct AccountService<R: AccountRepository> {
    repo: Arc<R>,
}

impl<R: AccountRepository> Clone for AccountService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: AccountRepository> AccountService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Register a new user with a salted password hash.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountService, repository::mock::MockAccountRepository};
    /// use service::accounts::domain::RegisterInput;
    /// use std::sync::Arc;
    /// let svc = AccountService::new(Arc::new(MockAccountRepository::default()));
    /// let input = RegisterInput { email: "user@example.com".into(), name: "Test".into(), password: "Secret123".into() };
    /// let user = tokio_test::block_on(svc.register(input)).unwrap();
    /// assert_eq!(user.email, "user@example.com");
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterInput) -> Result<AccountUser, ServiceError> {
        validate_email(input.email.trim())?;
        validate_required("name", &input.name)?;
        validate_password(&input.password)?;

        if let Some(existing) = self.repo.find_user_by_email(&input.email).await? {
            debug!(user_id = existing.id, "email already registered");
            return Err(ServiceError::conflict("Email already registered"));
        }

        let hash = password::hash_password(&input.password)?;
        let user = self.repo.create_user(&input.email, &input.name, hash).await?;
        info!(user_id = user.id, algorithm = ALGORITHM, "user_registered");
        Ok(user)
    }

    /// Verify credentials. No token is issued; the caller gets the user back.
    ///
    /// # Examples
    /// ```
    /// use service::accounts::{AccountService, repository::mock::MockAccountRepository};
    /// use service::accounts::domain::{RegisterInput, LoginInput};
    /// use std::sync::Arc;
    /// let svc = AccountService::new(Arc::new(MockAccountRepository::default()));
    /// let _ = tokio_test::block_on(svc.register(RegisterInput { email: "u@e.com".into(), name: "N".into(), password: "Passw0rd".into() }));
    /// let user = tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "Passw0rd".into() })).unwrap();
    /// assert_eq!(user.email, "u@e.com");
    /// assert!(tokio_test::block_on(svc.login(LoginInput { email: "u@e.com".into(), password: "nope".into() })).is_err());
    /// ```
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginInput) -> Result<AccountUser, ServiceError> {
        let user = self
            .repo
            .find_user_by_email(&input.email)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        let cred = self
            .repo
            .get_credentials(user.id)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized(INVALID_CREDENTIALS.into()))?;

        if !password::verify_password(&input.password, &cred.password_hash)? {
            warn!(user_id = user.id, "login rejected");
            return Err(ServiceError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        info!(user_id = user.id, "user_logged_in");
        Ok(user)
    }

    /// User with nested profile; `None` when the id is unknown.
    pub async fn get_user(&self, user_id: i32) -> Result<Option<UserWithProfile>, ServiceError> {
        self.repo.find_user_with_profile(user_id).await
    }

    /// Apply the supplied profile fields, creating the profile on first use.
    #[instrument(skip(self, patch))]
    pub async fn update_profile(&self, user_id: i32, patch: ProfilePatch) -> Result<UserWithProfile, ServiceError> {
        let updated = self
            .repo
            .upsert_profile(user_id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("User not found"))?;
        info!(user_id, "profile_updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::repo::seaorm::SeaOrmAccountRepository;
    use crate::accounts::repository::mock::MockAccountRepository;
    use crate::test_support::profiles_db;
    use models::profiles::user;
    use sea_orm::{EntityTrait, PaginatorTrait};

    fn ann() -> RegisterInput {
        RegisterInput { email: "ann@example.com".into(), name: "Ann".into(), password: "S3curePass!".into() }
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_and_creates_no_row() -> Result<(), anyhow::Error> {
        let db = profiles_db().await?;
        let svc = AccountService::new(Arc::new(SeaOrmAccountRepository::new(db.clone())));

        svc.register(ann()).await?;
        let err = svc.register(RegisterInput { name: "Imposter".into(), ..ann() }).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(ref m) if m == "Email already registered"), "{err:?}");
        assert_eq!(user::Entity::find().count(&db).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn password_is_stored_hashed() -> Result<(), anyhow::Error> {
        let db = profiles_db().await?;
        let svc = AccountService::new(Arc::new(SeaOrmAccountRepository::new(db.clone())));
        let u = svc.register(ann()).await?;

        let row = user::Entity::find_by_id(u.id).one(&db).await?.unwrap();
        assert_ne!(row.password_hash, "S3curePass!");
        assert!(row.password_hash.starts_with("$argon2"));
        Ok(())
    }

    #[tokio::test]
    async fn login_checks_password() -> Result<(), anyhow::Error> {
        let db = profiles_db().await?;
        let svc = AccountService::new(Arc::new(SeaOrmAccountRepository::new(db)));
        let u = svc.register(ann()).await?;

        let ok = svc.login(LoginInput { email: "ANN@example.com".into(), password: "S3curePass!".into() }).await?;
        assert_eq!(ok, u);

        let wrong = svc.login(LoginInput { email: "ann@example.com".into(), password: "guess".into() }).await;
        assert!(matches!(wrong, Err(ServiceError::Unauthorized(_))));

        let unknown = svc.login(LoginInput { email: "nobody@example.com".into(), password: "S3curePass!".into() }).await;
        assert!(matches!(unknown, Err(ServiceError::Unauthorized(_))));
        Ok(())
    }

    #[tokio::test]
    async fn register_validates_fields() {
        let svc = AccountService::new(Arc::new(MockAccountRepository::default()));
        let bad_email = svc.register(RegisterInput { email: "not-an-email".into(), ..ann() }).await;
        assert!(matches!(bad_email, Err(ServiceError::Validation { field: "email", .. })));

        let short = svc.register(RegisterInput { password: "short".into(), ..ann() }).await;
        assert!(matches!(short, Err(ServiceError::Validation { field: "password", .. })));
    }

    #[tokio::test]
    async fn profile_created_once_then_mutated() -> Result<(), anyhow::Error> {
        let db = profiles_db().await?;
        let svc = AccountService::new(Arc::new(SeaOrmAccountRepository::new(db.clone())));
        let u = svc.register(ann()).await?;

        assert_eq!(svc.get_user(u.id).await?.unwrap().profile, None);

        let patch: ProfilePatch = serde_json::from_str(r#"{"interests": "chess", "about": "hi"}"#)?;
        let first = svc.update_profile(u.id, patch).await?;
        assert_eq!(first.profile.as_ref().and_then(|p| p.interests.as_deref()), Some("chess"));

        let patch: ProfilePatch = serde_json::from_str(r#"{"about": "hello"}"#)?;
        let second = svc.update_profile(u.id, patch).await?;
        let profile = second.profile.unwrap();
        assert_eq!(profile.interests.as_deref(), Some("chess"));
        assert_eq!(profile.about.as_deref(), Some("hello"));
        assert_eq!(models::profiles::user_profile::Entity::find().count(&db).await?, 1);

        let fetched = svc.get_user(u.id).await?.unwrap();
        assert_eq!(fetched.profile, Some(profile));
        Ok(())
    }

    #[tokio::test]
    async fn profile_for_missing_user_is_not_found() -> Result<(), anyhow::Error> {
        let db = profiles_db().await?;
        let svc = AccountService::new(Arc::new(SeaOrmAccountRepository::new(db)));
        let err = svc.update_profile(99, ProfilePatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        assert!(svc.get_user(99).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn mock_repository_keeps_single_profile() -> Result<(), anyhow::Error> {
        let repo = Arc::new(MockAccountRepository::default());
        let svc = AccountService::new(Arc::clone(&repo));
        let u = svc.register(ann()).await?;
        svc.update_profile(u.id, ProfilePatch { about: Some(Some("a".into())), ..Default::default() }).await?;
        svc.update_profile(u.id, ProfilePatch { about: Some(Some("b".into())), ..Default::default() }).await?;
        assert_eq!(repo.profile_count(), 1);
        Ok(())
    }
}
