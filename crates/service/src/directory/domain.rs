use serde::{Deserialize, Serialize};

use models::directory::{user, user_details};

pub use models::directory::user_details::{DetailsPatch, Model as UserDetails};

pub type Timestamp = sea_orm::prelude::DateTimeWithTimeZone;

/// Body of `POST /users/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Body of `PUT /users/{id}`; absent fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// User representation with details nested; never carries the password.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserWithDetails {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub details: Option<UserDetails>,
}

impl UserWithDetails {
    pub fn from_rows(u: user::Model, details: Option<user_details::Model>) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            created_at: u.created_at,
            updated_at: u.updated_at,
            details,
        }
    }
}
