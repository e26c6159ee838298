//! # Expense Dashboard Backend
//!
//! Contains all non-UI logic for the expense dashboard.
//!
//! ```text
//! UI Layer (any HTTP client)
//!     ↓
//! IO Layer (REST API, DTO mapping)
//!     ↓
//! Domain Layer (credential check, filtering, aggregation, audit)
//!     ↓
//! Storage Layer (CSV files, in-memory credentials)
//! ```
//!
//! The flow per request: the session resolves to an identity, the record store
//! supplies the records that identity may see, the filter engine narrows them
//! and the aggregator turns them into summary and chart data.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    Router,
};
use log::info;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::{AppConfig, StorageConfig};
use crate::domain::{AccountService, AuditService, DashboardService};
use crate::storage::csv::{AuditRepository, CsvConnection, PerUserRepository, RecordRepository};
use crate::storage::{InMemoryUserRepository, RecordStorage, UserRepository};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub dashboard_service: DashboardService,
}

/// The record store doubles as the credential source unless credentials are configured
fn as_store_and_users<S>(store: S) -> (Arc<dyn RecordStorage>, Arc<dyn UserRepository>)
where
    S: RecordStorage + UserRepository + 'static,
{
    let store = Arc::new(store);
    let records: Arc<dyn RecordStorage> = store.clone();
    let users: Arc<dyn UserRepository> = store;
    (records, users)
}

/// Initialize the backend with all required services.
/// Records are loaded eagerly so a missing or corrupt backing file fails startup.
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up storage in {}", config.data_directory.display());
    let connection = CsvConnection::new(&config.data_directory)?;

    let (records, store_users) = match &config.storage {
        StorageConfig::SharedFile { file } => as_store_and_users(RecordRepository::new(
            connection.clone(),
            file,
            config.cache_ttl(),
        )),
        StorageConfig::PerUser { users_file } => as_store_and_users(PerUserRepository::new(
            connection.clone(),
            users_file,
            config.cache_ttl(),
        )?),
    };

    let loaded = records.load().context("Failed to load expense records")?;
    info!("Loaded {} expense records", loaded.len());

    let users: Arc<dyn UserRepository> = if config.credentials.is_empty() {
        store_users
    } else {
        Arc::new(InMemoryUserRepository::new(config.configured_users()))
    };

    info!("Setting up domain services");
    let audit_service = AuditService::new(Arc::new(AuditRepository::new(
        connection,
        &config.audit_log,
    )));
    let account_service = AccountService::new(users, audit_service.clone());
    let dashboard_service = DashboardService::new(records, account_service.clone(), audit_service);

    Ok(AppState {
        account_service,
        dashboard_service,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let origin = config
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed_origin '{}'", config.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Ok(Router::new()
        .nest("/api", io::rest::router())
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::auth::LoginCommand;
    use crate::storage::csv::test_utils::TestEnvironment;

    fn config_for(env: &TestEnvironment, storage: StorageConfig) -> AppConfig {
        AppConfig {
            data_directory: env.base_path.clone(),
            storage,
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_missing_backing_file_fails_startup() {
        let env = TestEnvironment::new().unwrap();
        let config = config_for(
            &env,
            StorageConfig::SharedFile {
                file: "s1.csv".to_string(),
            },
        );

        assert!(initialize_backend(&config).is_err());
    }

    #[test]
    fn test_configured_credentials_replace_store_credentials() {
        let env = TestEnvironment::with_scenario().unwrap();
        let mut config = config_for(
            &env,
            StorageConfig::SharedFile {
                file: "s1.csv".to_string(),
            },
        );
        config.credentials = vec![crate::config::CredentialConfig {
            username: "sakshi".to_string(),
            password: "hardcoded".to_string(),
            role: crate::domain::models::Role::User,
        }];

        let state = initialize_backend(&config).unwrap();
        let login = |password: &str| {
            state.account_service.login(LoginCommand {
                username: "sakshi".to_string(),
                password: password.to_string(),
            })
        };
        assert!(login("hardcoded").is_ok());
        assert!(login("sakshi123").is_err());
    }

    #[test]
    fn test_per_user_layout_starts_empty() {
        let env = TestEnvironment::new().unwrap();
        let config = config_for(
            &env,
            StorageConfig::PerUser {
                users_file: "users.csv".to_string(),
            },
        );

        let state = initialize_backend(&config).unwrap();
        assert_eq!(state.account_service.active_sessions(), 0);
        assert!(env.path("users.csv").exists());
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let env = TestEnvironment::with_scenario().unwrap();
        let mut config = config_for(
            &env,
            StorageConfig::SharedFile {
                file: "s1.csv".to_string(),
            },
        );
        let state = initialize_backend(&config).unwrap();

        config.allowed_origin = "bad\norigin".to_string();
        assert!(create_router(state, &config).is_err());
    }
}
