//! Domain models for users and authenticated identities.
//!
//! Usernames are normalized (trimmed, lower-cased) when a [`User`] or [`Identity`]
//! is built, so registration, login and ownership all compare the same form.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::record::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Anything other than "admin" is a regular user, matching the `usertype` column
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("admin") {
            Role::Admin
        } else {
            Role::User
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stored credentials. The password is kept and compared in plain text.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl User {
    pub fn new(username: &str, password: &str, role: Role) -> Self {
        Self {
            username: normalize_username(username),
            password: password.to_string(),
            role,
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            username: self.username.clone(),
            role: self.role,
        }
    }
}

// Keep passwords out of log output
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("username", &self.username)
            .field("password", &"***")
            .field("role", &self.role)
            .finish()
    }
}

/// Result of a successful credential check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn new(username: &str, role: Role) -> Self {
        Self {
            username: normalize_username(username),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Ownership rule: admins see everything, users only rows they paid for
    pub fn can_view(&self, record: &Record) -> bool {
        self.is_admin() || normalize_username(&record.paid_by) == self.username
    }
}

pub fn normalize_username(raw: &str) -> String {
    raw.trim().to_lowercase()
}
