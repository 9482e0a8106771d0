use async_trait::async_trait;

use models::profiles::user_profile::ProfilePatch;

use super::domain::{AccountUser, Credentials, UserWithProfile};
use crate::errors::ServiceError;

/// Repository abstraction for account persistence.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<AccountUser>, ServiceError>;
    async fn create_user(&self, email: &str, name: &str, password_hash: String) -> Result<AccountUser, ServiceError>;
    async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, ServiceError>;

    async fn find_user_with_profile(&self, user_id: i32) -> Result<Option<UserWithProfile>, ServiceError>;
    /// Create or merge the profile in one unit of work; `None` when the user is absent.
    async fn upsert_profile(&self, user_id: i32, patch: &ProfilePatch) -> Result<Option<UserWithProfile>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::accounts::domain::ProfileView;

    #[derive(Default)]
    struct State {
        users: Vec<(AccountUser, String)>,
        profiles: HashMap<i32, ProfileView>,
    }

    #[derive(Default)]
    pub struct MockAccountRepository {
        state: Mutex<State>,
    }

    impl MockAccountRepository {
        pub fn profile_count(&self) -> usize {
            self.state.lock().unwrap().profiles.len()
        }
    }

    fn merge(slot: &mut Option<String>, value: &Option<Option<String>>) {
        if let Some(v) = value {
            *slot = v.clone();
        }
    }

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn find_user_by_email(&self, email: &str) -> Result<Option<AccountUser>, ServiceError> {
            let state = self.state.lock().unwrap();
            let email = models::validation::normalize_email(email);
            Ok(state.users.iter().find(|(u, _)| u.email == email).map(|(u, _)| u.clone()))
        }

        async fn create_user(&self, email: &str, name: &str, password_hash: String) -> Result<AccountUser, ServiceError> {
            let mut state = self.state.lock().unwrap();
            let email = models::validation::normalize_email(email);
            if state.users.iter().any(|(u, _)| u.email == email) {
                return Err(ServiceError::conflict("Email already registered"));
            }
            let user = AccountUser { id: state.users.len() as i32 + 1, email, name: name.to_string() };
            state.users.push((user.clone(), password_hash));
            Ok(user)
        }

        async fn get_credentials(&self, user_id: i32) -> Result<Option<Credentials>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state
                .users
                .iter()
                .find(|(u, _)| u.id == user_id)
                .map(|(u, h)| Credentials { user_id: u.id, password_hash: h.clone() }))
        }

        async fn find_user_with_profile(&self, user_id: i32) -> Result<Option<UserWithProfile>, ServiceError> {
            let state = self.state.lock().unwrap();
            Ok(state.users.iter().find(|(u, _)| u.id == user_id).map(|(u, _)| UserWithProfile {
                profile: state.profiles.get(&u.id).cloned(),
                ..UserWithProfile::from(u.clone())
            }))
        }

        async fn upsert_profile(&self, user_id: i32, patch: &ProfilePatch) -> Result<Option<UserWithProfile>, ServiceError> {
            let mut state = self.state.lock().unwrap();
            let Some(user) = state.users.iter().find(|(u, _)| u.id == user_id).map(|(u, _)| u.clone()) else {
                return Ok(None);
            };
            let profile = state.profiles.entry(user_id).or_default();
            merge(&mut profile.interests, &patch.interests);
            merge(&mut profile.about, &patch.about);
            merge(&mut profile.address, &patch.address);
            let profile = Some(profile.clone());
            Ok(Some(UserWithProfile { profile, ..UserWithProfile::from(user) }))
        }
    }
}
