//! # Shared-File Record Repository
//!
//! One CSV table holds every expense row together with the credential columns
//! (`username`, `password`, `usertype`). This is both the Record Store and the
//! credential source for deployments that keep everything in a single file.
//!
//! ```csv
//! date,amount,category,paid by,username,password,usertype
//! 2024-01-05,100,Food,sakshi,sakshi,pw1,user
//! ,0,,,riya,pw2,user
//! ```
//!
//! The second row is a registration row: it carries credentials but no expense
//! data, so it is not returned as a record.

use csv::{ReaderBuilder, StringRecord, Writer};
use log::{debug, info, warn};
use std::fs::{self, OpenOptions};
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use super::connection::CsvConnection;
use super::schema::{Column, ExpenseSchema};
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::models::user::normalize_username;
use crate::domain::models::{Record, Role, User};
use crate::storage::cache::TableCache;
use crate::storage::traits::{RecordStorage, UserRepository};

const CREDENTIAL_HEADERS: [(Column, &str); 3] = [
    (Column::Username, "username"),
    (Column::Password, "password"),
    (Column::UserType, "usertype"),
];

/// Parsed content of the shared table
struct SharedTable {
    records: Arc<Vec<Record>>,
    users: Vec<User>,
}

/// CSV-based record repository over a single shared file
pub struct RecordRepository {
    connection: CsvConnection,
    file_path: PathBuf,
    cache: TableCache<SharedTable>,
}

impl RecordRepository {
    /// Create a repository for `file_name` inside the connection's data directory
    pub fn new(connection: CsvConnection, file_name: &str, cache_ttl: Option<Duration>) -> Self {
        let file_path = connection.file_path(file_name);
        Self {
            connection,
            file_path,
            cache: TableCache::new(cache_ttl),
        }
    }

    fn table(&self) -> DashboardResult<Arc<SharedTable>> {
        self.cache.get_or_try_load(|| self.read_table())
    }

    /// Read header and rows without interpreting them
    fn read_raw(&self) -> DashboardResult<(StringRecord, Vec<StringRecord>)> {
        if !self.file_path.exists() {
            return Err(DashboardError::data_load(&self.file_path, "file not found"));
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.file_path)
            .map_err(|e| DashboardError::data_load(&self.file_path, e))?;

        let headers = reader
            .headers()
            .map_err(|e| DashboardError::data_load(&self.file_path, e))?
            .clone();

        let mut rows = Vec::new();
        for result in reader.records() {
            rows.push(result.map_err(|e| DashboardError::data_load(&self.file_path, e))?);
        }

        Ok((headers, rows))
    }

    fn read_table(&self) -> DashboardResult<SharedTable> {
        let (headers, rows) = self.read_raw()?;
        let schema = ExpenseSchema::from_headers(&headers)
            .map_err(|reason| DashboardError::data_load(&self.file_path, reason))?;

        let mut records = Vec::with_capacity(rows.len());
        let mut users: Vec<User> = Vec::new();

        for row in &rows {
            if let Some(user) = schema.credential(row) {
                if users.iter().any(|existing| existing.username == user.username) {
                    debug!("Ignoring repeated credentials for {}", user.username);
                } else {
                    users.push(user);
                }
            }
            if !schema.is_credential_only(row) {
                records.push(schema.parse_record(row));
            }
        }

        info!(
            "Loaded {} records and {} users from {}",
            records.len(),
            users.len(),
            self.file_path.display()
        );

        Ok(SharedTable {
            records: Arc::new(records),
            users,
        })
    }

    /// Write the whole table through a temporary file and rename it into place
    fn write_raw(&self, headers: &StringRecord, rows: &[StringRecord]) -> DashboardResult<()> {
        let temp_path = self.file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let mut csv_writer = Writer::from_writer(BufWriter::new(file));

            csv_writer.write_record(headers)?;
            for row in rows {
                let padded: Vec<&str> = (0..headers.len())
                    .map(|index| row.get(index).unwrap_or(""))
                    .collect();
                csv_writer.write_record(&padded)?;
            }
            csv_writer.flush()?;
        }

        fs::rename(&temp_path, &self.file_path)?;
        Ok(())
    }
}

impl RecordStorage for RecordRepository {
    fn load(&self) -> DashboardResult<Arc<Vec<Record>>> {
        Ok(Arc::clone(&self.table()?.records))
    }

    fn reload(&self) -> DashboardResult<Arc<Vec<Record>>> {
        info!("Reloading records from {}", self.file_path.display());
        self.cache.invalidate();
        self.load()
    }

    fn append_user(&self, username: &str, password: &str) -> DashboardResult<User> {
        let user = User::new(username, password, Role::User);
        let _guard = self.connection.lock_writes();

        // Check against the file itself, not a possibly stale cache
        let table = self.read_table()?;
        if table.users.iter().any(|existing| existing.username == user.username) {
            warn!("Registration rejected, username already exists: {}", user.username);
            return Err(DashboardError::DuplicateUser(user.username));
        }

        let (mut headers, mut rows) = self.read_raw()?;
        let schema = ExpenseSchema::from_headers(&headers)
            .map_err(|reason| DashboardError::data_load(&self.file_path, reason))?;
        for (column, header) in CREDENTIAL_HEADERS {
            if !schema.has(column) {
                headers.push_field(header);
            }
        }
        let schema = ExpenseSchema::from_headers(&headers)
            .map_err(|reason| DashboardError::data_load(&self.file_path, reason))?;

        let mut row = vec![String::new(); headers.len()];
        for (column, value) in [
            (Column::Amount, "0"),
            (Column::Username, user.username.as_str()),
            (Column::Password, user.password.as_str()),
            (Column::UserType, user.role.as_str()),
        ] {
            if let Some(index) = schema.position(column) {
                row[index] = value.to_string();
            }
        }

        rows.push(StringRecord::from(row));
        self.write_raw(&headers, &rows)?;
        self.cache.invalidate();

        info!("Registered new user {} in {}", user.username, self.file_path.display());
        Ok(user)
    }
}

impl UserRepository for RecordRepository {
    fn find_user(&self, username: &str) -> DashboardResult<Option<User>> {
        let wanted = normalize_username(username);
        Ok(self
            .table()?
            .users
            .iter()
            .find(|user| user.username == wanted)
            .cloned())
    }

    fn add_user(&self, username: &str, password: &str) -> DashboardResult<User> {
        self.append_user(username, password)
    }
}
