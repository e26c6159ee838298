//! Audit logger.
//!
//! Recording an action never fails from the caller's point of view: a write
//! error is logged and dropped.

use log::warn;
use std::sync::Arc;

use crate::domain::models::{AuditAction, AuditEntry};
use crate::storage::AuditStorage;

#[derive(Clone)]
pub struct AuditService {
    storage: Arc<dyn AuditStorage>,
}

impl AuditService {
    pub fn new(storage: Arc<dyn AuditStorage>) -> Self {
        Self { storage }
    }

    pub fn record(&self, username: &str, action: AuditAction, details: impl Into<String>) {
        let entry = AuditEntry::now(username, action, details);
        if let Err(e) = self.storage.append_entry(&entry) {
            warn!("Failed to write audit entry '{}' for {}: {}", action, username, e);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::errors::{DashboardError, DashboardResult};
    use std::sync::{Mutex, PoisonError};

    /// Audit storage that keeps entries in memory
    #[derive(Default)]
    pub struct RecordingAuditStorage {
        entries: Mutex<Vec<AuditEntry>>,
    }

    impl RecordingAuditStorage {
        pub fn entries(&self) -> Vec<AuditEntry> {
            self.entries.lock().unwrap_or_else(PoisonError::into_inner).clone()
        }

        pub fn actions(&self) -> Vec<(String, AuditAction)> {
            self.entries()
                .into_iter()
                .map(|entry| (entry.username, entry.action))
                .collect()
        }
    }

    impl AuditStorage for RecordingAuditStorage {
        fn append_entry(&self, entry: &AuditEntry) -> DashboardResult<()> {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(entry.clone());
            Ok(())
        }
    }

    struct FailingAuditStorage;

    impl AuditStorage for FailingAuditStorage {
        fn append_entry(&self, _entry: &AuditEntry) -> DashboardResult<()> {
            Err(DashboardError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    #[test]
    fn test_record_appends_entry() {
        let storage = Arc::new(RecordingAuditStorage::default());
        let service = AuditService::new(storage.clone());

        service.record("sakshi", AuditAction::Login, "");
        service.record("sakshi", AuditAction::Download, "filtered_expenses.csv");

        let entries = storage.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].action, AuditAction::Download);
        assert_eq!(entries[1].details, "filtered_expenses.csv");
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let service = AuditService::new(Arc::new(FailingAuditStorage));
        service.record("sakshi", AuditAction::Logout, "");
    }
}
