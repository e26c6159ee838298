//! Domain model for audit log entries
//!
//! Entries are append-only: once written they are never changed or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    Login,
    Logout,
    Register,
    ViewedData,
    Download,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Login => "Login",
            AuditAction::Logout => "Logout",
            AuditAction::Register => "Register",
            AuditAction::ViewedData => "Viewed Data",
            AuditAction::Download => "Download",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub username: String,
    pub action: AuditAction,
    pub details: String,
}

impl AuditEntry {
    /// Create an entry stamped with the current time
    pub fn now(username: &str, action: AuditAction, details: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            username: username.to_string(),
            action,
            details: details.into(),
        }
    }

    /// Timestamp as written to the log file
    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}
