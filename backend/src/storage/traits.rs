//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow the shared-file,
//! per-user and in-memory backends to be used interchangeably by the domain layer.
//!
//! All operations are synchronous: the record set is small and every call only
//! blocks on local file I/O.

use std::sync::Arc;

use crate::domain::errors::DashboardResult;
use crate::domain::models::{AuditEntry, Identity, Record, User};

/// Read and append interface of the Record Store
pub trait RecordStorage: Send + Sync {
    /// Load every record, served from the cache while it is fresh
    fn load(&self) -> DashboardResult<Arc<Vec<Record>>>;

    /// Drop the cache and read the backing file again
    fn reload(&self) -> DashboardResult<Arc<Vec<Record>>>;

    /// Create an empty record set owned by `username`.
    /// Fails with `DuplicateUser` when the username is already registered.
    fn append_user(&self, username: &str, password: &str) -> DashboardResult<User>;

    /// Records visible to an identity under the ownership rule, in file order
    fn records_for(&self, identity: &Identity) -> DashboardResult<Vec<Record>> {
        let records = self.load()?;
        Ok(records
            .iter()
            .filter(|record| identity.can_view(record))
            .cloned()
            .collect())
    }
}

/// Credential source used by the credential check
pub trait UserRepository: Send + Sync {
    /// Find a user by username (case-insensitive)
    fn find_user(&self, username: &str) -> DashboardResult<Option<User>>;

    /// Register a new user with the `user` role
    fn add_user(&self, username: &str, password: &str) -> DashboardResult<User>;
}

/// Append-only audit log
pub trait AuditStorage: Send + Sync {
    fn append_entry(&self, entry: &AuditEntry) -> DashboardResult<()>;
}
