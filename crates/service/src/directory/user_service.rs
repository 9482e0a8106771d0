use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use tracing::{info, instrument};

use common::pagination::Pagination;
use models::directory::{user::{self, UserChanges}, user_details};
use models::validation::{validate_email, validate_password, validate_required};

use super::domain::{NewUser, UserPatch, UserWithDetails};
use crate::errors::ServiceError;
use crate::password;

const EMAIL_TAKEN: &str = "Email already registered";
const USERNAME_TAKEN: &str = "Username already taken";

/// Reject an email/username already held by a user other than `except`.
async fn ensure_unique<C: ConnectionTrait>(
    db: &C,
    email: Option<&str>,
    username: Option<&str>,
    except: Option<i32>,
) -> Result<(), ServiceError> {
    if let Some(email) = email {
        if let Some(other) = user::find_by_email(db, email).await? {
            if Some(other.id) != except {
                return Err(ServiceError::conflict(EMAIL_TAKEN));
            }
        }
    }
    if let Some(username) = username {
        if let Some(other) = user::find_by_username(db, username).await? {
            if Some(other.id) != except {
                return Err(ServiceError::conflict(USERNAME_TAKEN));
            }
        }
    }
    Ok(())
}

/// Create a user; email and username must both be unused.
#[instrument(skip(db, input), fields(email = %input.email, username = %input.username))]
pub async fn create_user(db: &DatabaseConnection, input: NewUser) -> Result<UserWithDetails, ServiceError> {
    validate_email(input.email.trim())?;
    validate_required("username", &input.username)?;
    validate_password(&input.password)?;
    let hash = password::hash_password(&input.password)?;

    let txn = db.begin().await?;
    ensure_unique(&txn, Some(&input.email), Some(&input.username), None).await?;
    let created = user::create(&txn, &input.email, &input.username, hash).await?;
    txn.commit().await?;
    info!(user_id = created.id, "user_created");
    Ok(UserWithDetails::from_rows(created, None))
}

/// Get a user by id with details nested.
pub async fn get_user(db: &DatabaseConnection, id: i32) -> Result<Option<UserWithDetails>, ServiceError> {
    let found = user::find_with_details(db, id).await?;
    Ok(found.map(|(u, d)| UserWithDetails::from_rows(u, d)))
}

/// List users with skip/limit, in insertion order.
pub async fn list_users(db: &DatabaseConnection, opts: Pagination) -> Result<Vec<UserWithDetails>, ServiceError> {
    let (skip, limit) = opts.normalize();
    let rows = user::list_with_details(db, skip, limit).await?;
    Ok(rows.into_iter().map(|(u, d)| UserWithDetails::from_rows(u, d)).collect())
}

/// Apply only the supplied fields; uniqueness is checked against other users.
#[instrument(skip(db, patch))]
pub async fn update_user(db: &DatabaseConnection, id: i32, patch: UserPatch) -> Result<UserWithDetails, ServiceError> {
    if let Some(p) = &patch.password {
        validate_password(p)?;
    }
    let changes = UserChanges {
        email: patch.email.clone(),
        username: patch.username.clone(),
        password_hash: patch.password.as_deref().map(password::hash_password).transpose()?,
    };
    changes.validate()?;

    let txn = db.begin().await?;
    let existing = user::find(&txn, id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User not found"))?;
    ensure_unique(&txn, patch.email.as_deref(), patch.username.as_deref(), Some(id)).await?;
    let updated = user::update(&txn, existing, &changes).await?;
    let details = user_details::find_by_user(&txn, id).await?;
    txn.commit().await?;
    info!(user_id = id, "user_updated");
    Ok(UserWithDetails::from_rows(updated, details))
}

/// Delete a user and, with it, the details row. Returns false if absent.
#[instrument(skip(db))]
pub async fn delete_user(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let txn = db.begin().await?;
    if user::find(&txn, id).await?.is_none() {
        return Ok(false);
    }
    let had_details = user_details::delete_by_user(&txn, id).await?;
    let deleted = user::delete(&txn, id).await?;
    txn.commit().await?;
    info!(user_id = id, had_details, "user_deleted");
    Ok(deleted)
}
