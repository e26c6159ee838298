//! Credential source backed by a fixed mapping from configuration.
//!
//! Registrations are kept in memory for the lifetime of the process.

use log::{info, warn};
use std::collections::HashMap;
use std::sync::{RwLock, PoisonError};

use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::models::user::normalize_username;
use crate::domain::models::{Role, User};
use crate::storage::traits::UserRepository;

pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new<I>(users: I) -> Self
    where
        I: IntoIterator<Item = User>,
    {
        let users: HashMap<String, User> = users
            .into_iter()
            .map(|user| (user.username.clone(), user))
            .collect();
        info!("Configured {} in-memory credentials", users.len());
        Self {
            users: RwLock::new(users),
        }
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_user(&self, username: &str) -> DashboardResult<Option<User>> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get(&normalize_username(username)).cloned())
    }

    fn add_user(&self, username: &str, password: &str) -> DashboardResult<User> {
        let user = User::new(username, password, Role::User);
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(&user.username) {
            warn!("Registration rejected, username already exists: {}", user.username);
            return Err(DashboardError::DuplicateUser(user.username));
        }
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new(vec![
            User::new("sakshi", "sakshi123", Role::User),
            User::new("Admin", "admin123", Role::Admin),
        ])
    }

    #[test]
    fn test_find_user_normalizes_name() {
        let repo = repo();
        assert_eq!(repo.users.read().unwrap().len(), 2);
        assert_eq!(repo.find_user(" ADMIN ").unwrap().unwrap().role, Role::Admin);
        assert!(repo.find_user("riya").unwrap().is_none());
    }

    #[test]
    fn test_add_user() {
        let repo = repo();
        repo.add_user("Riya", "pw").unwrap();
        assert_eq!(repo.find_user("riya").unwrap().unwrap().password, "pw");

        let err = repo.add_user("SAKSHI", "x").unwrap_err();
        assert!(matches!(err, DashboardError::DuplicateUser(ref name) if name == "sakshi"));
    }
}
