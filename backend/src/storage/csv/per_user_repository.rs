//! # Per-User Record Repository
//!
//! Credentials live in `users.csv` and each user's expenses live in their own
//! directory:
//!
//! ```text
//! data/
//! ├── users.csv              ← username,password,role
//! ├── sakshi/
//! │   └── expenses.csv
//! └── akanksha/
//!     └── expenses.csv
//! ```
//!
//! A row in a user's file with an empty `paid by` belongs to that user.
//!
//! A directory belongs to exactly one user. New usernames must already be in
//! directory form (see [`safe_directory_name`]), and when a hand-edited
//! `users.csv` still maps two names to one directory, only the first of them
//! owns its records.

use csv::{ReaderBuilder, Writer};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::connection::{safe_directory_name, CsvConnection};
use super::schema::{export_headers, ExpenseSchema};
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::models::user::normalize_username;
use crate::domain::models::{Record, Role, User};
use crate::storage::cache::TableCache;
use crate::storage::traits::{RecordStorage, UserRepository};

const USERS_HEADER: [&str; 3] = ["username", "password", "role"];

struct UserTables {
    records: Arc<Vec<Record>>,
    users: Vec<User>,
}

/// CSV-based record repository with one directory per user
pub struct PerUserRepository {
    connection: CsvConnection,
    users_path: PathBuf,
    cache: TableCache<UserTables>,
}

impl PerUserRepository {
    /// Create the repository, writing an empty `users_file` when none exists
    pub fn new(
        connection: CsvConnection,
        users_file: &str,
        cache_ttl: Option<Duration>,
    ) -> DashboardResult<Self> {
        let users_path = connection.file_path(users_file);
        if connection.ensure_file_with_header(&users_path, &USERS_HEADER)? {
            info!("Created users file: {}", users_path.display());
        }

        Ok(Self {
            connection,
            users_path,
            cache: TableCache::new(cache_ttl),
        })
    }

    fn tables(&self) -> DashboardResult<Arc<UserTables>> {
        self.cache.get_or_try_load(|| self.read_tables())
    }

    fn read_users(&self) -> DashboardResult<Vec<User>> {
        if !self.users_path.exists() {
            return Err(DashboardError::data_load(&self.users_path, "file not found"));
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.users_path)
            .map_err(|e| DashboardError::data_load(&self.users_path, e))?;

        let mut users: Vec<User> = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| DashboardError::data_load(&self.users_path, e))?;
            let username = row.get(0).map(str::trim).unwrap_or("");
            let password = row.get(1).map(str::trim).unwrap_or("");
            if username.is_empty() || password.is_empty() {
                debug!("Skipping incomplete row in {}", self.users_path.display());
                continue;
            }

            let user = User::new(username, password, Role::parse(row.get(2).unwrap_or("")));
            if !users.iter().any(|existing| existing.username == user.username) {
                users.push(user);
            }
        }

        Ok(users)
    }

    /// Read one user's expense file. A missing file is an empty record set.
    fn read_user_records(&self, username: &str) -> DashboardResult<Vec<Record>> {
        let path = self.connection.user_records_path(username);
        if !path.exists() {
            debug!("No expense file for {} at {}", username, path.display());
            return Ok(Vec::new());
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| DashboardError::data_load(&path, e))?;
        let headers = reader
            .headers()
            .map_err(|e| DashboardError::data_load(&path, e))?
            .clone();
        let schema =
            ExpenseSchema::from_headers(&headers).map_err(|reason| DashboardError::data_load(&path, reason))?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| DashboardError::data_load(&path, e))?;
            let mut record = schema.parse_record(&row);
            if record.paid_by.is_empty() {
                record.paid_by = username.to_string();
            }
            records.push(record);
        }

        Ok(records)
    }

    fn read_tables(&self) -> DashboardResult<UserTables> {
        let users = self.read_users()?;
        let mut claimed = HashSet::new();
        let mut records = Vec::new();
        for user in &users {
            if !claimed.insert(safe_directory_name(&user.username)) {
                warn!(
                    "Skipping records for {}, directory already belongs to another user",
                    user.username
                );
                continue;
            }
            records.extend(self.read_user_records(&user.username)?);
        }

        info!(
            "Loaded {} records for {} users from {}",
            records.len(),
            users.len(),
            self.connection.base_directory().display()
        );

        Ok(UserTables {
            records: Arc::new(records),
            users,
        })
    }

    fn write_empty_records_file(&self, path: &Path) -> DashboardResult<()> {
        if path.exists() {
            warn!("Keeping existing expense file {}", path.display());
            return Ok(());
        }
        self.connection.ensure_file_with_header(path, &export_headers())?;
        Ok(())
    }
}

impl RecordStorage for PerUserRepository {
    fn load(&self) -> DashboardResult<Arc<Vec<Record>>> {
        Ok(Arc::clone(&self.tables()?.records))
    }

    fn reload(&self) -> DashboardResult<Arc<Vec<Record>>> {
        info!("Reloading per-user records from {}", self.connection.base_directory().display());
        self.cache.invalidate();
        self.load()
    }

    fn append_user(&self, username: &str, password: &str) -> DashboardResult<User> {
        let user = User::new(username, password, Role::User);
        let _guard = self.connection.lock_writes();

        let directory = safe_directory_name(&user.username);
        if directory != user.username {
            warn!("Registration rejected, {} is not a valid directory name", user.username);
            return Err(DashboardError::InvalidInput(format!(
                "username '{}' cannot be used as a directory name, try '{}'",
                user.username, directory
            )));
        }

        let users = self.read_users()?;
        if users.iter().any(|existing| existing.username == user.username) {
            warn!("Registration rejected, username already exists: {}", user.username);
            return Err(DashboardError::DuplicateUser(user.username));
        }
        if let Some(owner) = users
            .iter()
            .find(|existing| safe_directory_name(&existing.username) == directory)
        {
            warn!(
                "Registration rejected, directory {} belongs to {}",
                directory, owner.username
            );
            return Err(DashboardError::DuplicateUser(user.username));
        }

        let records_path = self.connection.user_records_path(&user.username);
        self.write_empty_records_file(&records_path)?;

        let file = OpenOptions::new().append(true).open(&self.users_path)?;
        let mut csv_writer = Writer::from_writer(file);
        csv_writer.write_record([
            user.username.as_str(),
            user.password.as_str(),
            user.role.as_str(),
        ])?;
        csv_writer.flush()?;

        self.cache.invalidate();
        info!("Registered new user {} with records at {}", user.username, records_path.display());
        Ok(user)
    }
}

impl UserRepository for PerUserRepository {
    fn find_user(&self, username: &str) -> DashboardResult<Option<User>> {
        let wanted = normalize_username(username);
        Ok(self
            .tables()?
            .users
            .iter()
            .find(|user| user.username == wanted)
            .cloned())
    }

    fn add_user(&self, username: &str, password: &str) -> DashboardResult<User> {
        self.append_user(username, password)
    }
}
