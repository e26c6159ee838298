//! Credential check against an explicit credential source.
//!
//! Passwords are stored and compared as plaintext.

use log::{debug, info};
use std::sync::Arc;

use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::models::Identity;
use crate::storage::UserRepository;

#[derive(Clone)]
pub struct CredentialService {
    users: Arc<dyn UserRepository>,
}

impl CredentialService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Resolve an identity for a username/password pair.
    /// Unknown users and wrong passwords fail the same way.
    pub fn authenticate(&self, username: &str, password: &str) -> DashboardResult<Identity> {
        match self.users.find_user(username)? {
            Some(user) if user.password == password => {
                info!("Authenticated {} as {}", user.username, user.role);
                Ok(user.identity())
            }
            Some(user) => {
                debug!("Password mismatch for {}", user.username);
                Err(DashboardError::InvalidCredentials)
            }
            None => {
                debug!("Unknown username {}", username.trim());
                Err(DashboardError::InvalidCredentials)
            }
        }
    }
}
