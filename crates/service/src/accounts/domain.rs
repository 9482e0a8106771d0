use serde::{Deserialize, Serialize};

use models::profiles::{user, user_profile};

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterInput {
    pub email: String,
    pub name: String,
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Domain user (business view, no credentials)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

/// Stored credentials (hashed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: i32,
    pub password_hash: String,
}

/// Profile fields as exposed to clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
    pub interests: Option<String>,
    pub about: Option<String>,
    pub address: Option<String>,
}

/// User with its optional profile nested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserWithProfile {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub profile: Option<ProfileView>,
}

impl From<user::Model> for AccountUser {
    fn from(u: user::Model) -> Self {
        Self { id: u.id, email: u.email, name: u.name }
    }
}

impl From<user_profile::Model> for ProfileView {
    fn from(p: user_profile::Model) -> Self {
        Self { interests: p.interests, about: p.about, address: p.address }
    }
}

impl From<AccountUser> for UserWithProfile {
    fn from(u: AccountUser) -> Self {
        Self { id: u.id, email: u.email, name: u.name, profile: None }
    }
}

impl UserWithProfile {
    pub fn from_rows(u: user::Model, profile: Option<user_profile::Model>) -> Self {
        Self { id: u.id, email: u.email, name: u.name, profile: profile.map(Into::into) }
    }
}
