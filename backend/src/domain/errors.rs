//! Errors raised by the dashboard domain and storage layers.
//!
//! - [`DataLoad`] the backing file is missing or cannot be parsed. Fatal at startup.
//! - [`InvalidCredentials`] unknown username or wrong password. The caller re-prompts.
//! - [`DuplicateUser`] registration with a username that already exists.
//! - [`NotAuthenticated`] the session is unknown or already logged out.
//!
//! An empty filtered record set is never an error.
//!
//! [`DataLoad`]: DashboardError::DataLoad
//! [`InvalidCredentials`]: DashboardError::InvalidCredentials
//! [`DuplicateUser`]: DashboardError::DuplicateUser
//! [`NotAuthenticated`]: DashboardError::NotAuthenticated

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Failed to load data from {path}: {reason}")]
    DataLoad { path: String, reason: String },
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("\"{0}\" already exists")]
    DuplicateUser(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Not authenticated")]
    NotAuthenticated,
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl DashboardError {
    pub fn data_load(path: &Path, reason: impl ToString) -> Self {
        Self::DataLoad {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }

    /// Stable machine readable code used by the HTTP layer
    pub fn code(&self) -> &'static str {
        match self {
            Self::DataLoad { .. } => "DATA_LOAD_ERROR",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::DuplicateUser(_) => "DUPLICATE_USER",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::Io(_) | Self::Csv(_) => "STORAGE_ERROR",
        }
    }
}

pub type DashboardResult<T> = Result<T, DashboardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DashboardError::InvalidCredentials.code(), "INVALID_CREDENTIALS");
        assert_eq!(
            DashboardError::DuplicateUser("sakshi".to_string()).code(),
            "DUPLICATE_USER"
        );
        assert_eq!(
            DashboardError::data_load(Path::new("missing.csv"), "not found").code(),
            "DATA_LOAD_ERROR"
        );
    }

    #[test]
    fn test_data_load_message_names_path() {
        let err = DashboardError::data_load(Path::new("data/s1.csv"), "file not found");
        assert_eq!(err.to_string(), "Failed to load data from data/s1.csv: file not found");
    }
}
