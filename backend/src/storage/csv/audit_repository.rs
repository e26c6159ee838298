//! # CSV Audit Repository
//!
//! Append-only audit log. Existing rows are never rewritten.
//!
//! ```csv
//! timestamp,username,action,details
//! 2024-03-01 10:30:00,sakshi,Login,
//! 2024-03-01 10:30:05,sakshi,Viewed Data,3 records
//! ```

use csv::Writer;
use log::debug;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::errors::DashboardResult;
use crate::domain::models::AuditEntry;
use crate::storage::traits::AuditStorage;

const AUDIT_HEADER: [&str; 4] = ["timestamp", "username", "action", "details"];

#[derive(Clone)]
pub struct AuditRepository {
    connection: CsvConnection,
    file_path: PathBuf,
}

impl AuditRepository {
    pub fn new(connection: CsvConnection, file_name: &str) -> Self {
        let file_path = connection.file_path(file_name);
        Self {
            connection,
            file_path,
        }
    }
}

impl AuditStorage for AuditRepository {
    fn append_entry(&self, entry: &AuditEntry) -> DashboardResult<()> {
        let _guard = self.connection.lock_writes();
        self.connection
            .ensure_file_with_header(&self.file_path, &AUDIT_HEADER)?;

        let file = OpenOptions::new().append(true).open(&self.file_path)?;
        let mut csv_writer = Writer::from_writer(BufWriter::new(file));
        csv_writer.write_record([
            entry.formatted_timestamp().as_str(),
            entry.username.as_str(),
            entry.action.as_str(),
            entry.details.as_str(),
        ])?;
        csv_writer.flush()?;

        debug!("Audit: {} {}", entry.username, entry.action);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::AuditAction;
    use crate::storage::csv::test_utils::TestEnvironment;
    use csv::Reader;

    struct AuditRow {
        timestamp: String,
        action: String,
        details: String,
    }

    fn read_entries(repo: &AuditRepository) -> Vec<AuditRow> {
        if !repo.file_path.exists() {
            return Vec::new();
        }
        let mut reader = Reader::from_path(&repo.file_path).unwrap();
        reader
            .records()
            .map(|result| {
                let record = result.unwrap();
                let cell = |index: usize| record.get(index).unwrap_or("").to_string();
                AuditRow {
                    timestamp: cell(0),
                    action: cell(2),
                    details: cell(3),
                }
            })
            .collect()
    }

    #[test]
    fn test_header_written_once() {
        let env = TestEnvironment::new().unwrap();
        let repo = AuditRepository::new(env.connection.clone(), "audit_log.csv");

        repo.append_entry(&AuditEntry::now("sakshi", AuditAction::Login, ""))
            .unwrap();
        repo.append_entry(&AuditEntry::now("sakshi", AuditAction::Logout, ""))
            .unwrap();

        let content = env.read_file("audit_log.csv");
        assert_eq!(content.matches("timestamp,username,action,details").count(), 1);
        assert_eq!(content.lines().count(), 3);
    }

    #[test]
    fn test_entries_read_back_in_order() {
        let env = TestEnvironment::new().unwrap();
        let repo = AuditRepository::new(env.connection.clone(), "audit_log.csv");

        repo.append_entry(&AuditEntry::now("sakshi", AuditAction::Login, ""))
            .unwrap();
        repo.append_entry(&AuditEntry::now("sakshi", AuditAction::ViewedData, "2 records, food"))
            .unwrap();

        let rows = read_entries(&repo);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].action, "Login");
        assert_eq!(rows[1].action, "Viewed Data");
        assert_eq!(rows[1].details, "2 records, food");
        assert_eq!(rows[1].timestamp.len(), "2024-01-01 00:00:00".len());
    }

    #[test]
    fn test_existing_entries_are_preserved() {
        let env = TestEnvironment::new().unwrap();
        env.write_file(
            "audit_log.csv",
            "timestamp,username,action,details\n2024-01-01 09:00:00,akanksha,Login,\n",
        );
        let repo = AuditRepository::new(env.connection.clone(), "audit_log.csv");

        repo.append_entry(&AuditEntry::now("akanksha", AuditAction::Download, "filtered_expenses.csv"))
            .unwrap();

        let rows = read_entries(&repo);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].timestamp, "2024-01-01 09:00:00");
        assert_eq!(rows[1].action, "Download");
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let env = TestEnvironment::new().unwrap();
        let repo = AuditRepository::new(env.connection.clone(), "audit_log.csv");
        assert!(read_entries(&repo).is_empty());
    }
}
