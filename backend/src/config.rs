//! # Configuration
//!
//! Server settings read from a YAML file. The path comes from the
//! `EXPENSE_DASHBOARD_CONFIG` environment variable and defaults to
//! `dashboard.yaml`; when the file does not exist the built-in defaults apply.
//!
//! ```yaml
//! data_directory: "data"
//! storage:
//!   kind: shared_file
//!   file: "s1.csv"
//! audit_log: "audit_log.csv"
//! cache_ttl_secs: 300
//! bind_address: "127.0.0.1:3000"
//! allowed_origin: "http://localhost:8080"
//! credentials:
//!   - username: admin
//!     password: admin123
//!     role: admin
//! ```

use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::models::{Role, User};

pub const CONFIG_ENV_VAR: &str = "EXPENSE_DASHBOARD_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "dashboard.yaml";

/// Which record layout backs the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageConfig {
    SharedFile { file: String },
    PerUser { users_file: String },
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::SharedFile {
            file: "s1.csv".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialConfig {
    pub username: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::User
}

impl From<&CredentialConfig> for User {
    fn from(config: &CredentialConfig) -> Self {
        User::new(&config.username, &config.password, config.role)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub storage: StorageConfig,
    pub audit_log: String,
    /// Absent: records stay cached until a reload or a write
    pub cache_ttl_secs: Option<u64>,
    pub bind_address: String,
    pub allowed_origin: String,
    /// When non-empty, replaces the record store as the credential source
    pub credentials: Vec<CredentialConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: PathBuf::from("data"),
            storage: StorageConfig::default(),
            audit_log: "audit_log.csv".to_string(),
            cache_ttl_secs: None,
            bind_address: "127.0.0.1:3000".to_string(),
            allowed_origin: "http://localhost:8080".to_string(),
            credentials: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load from `$EXPENSE_DASHBOARD_CONFIG`, or `dashboard.yaml` when unset
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(Path::new(&path))
    }

    /// Load from a file, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let yaml_content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    pub fn configured_users(&self) -> Vec<User> {
        self.credentials.iter().map(User::from).collect()
    }
}
