//! # Domain Layer
//!
//! Business logic of the expense dashboard:
//!
//! - **Credential check**: username/password against an explicit credential source
//! - **Filter engine**: field-value and date-range constraints over records
//! - **Aggregation**: totals and chart series
//! - **Audit**: fire-and-forget action log
//!
//! Services are synchronous and storage-agnostic; they only see the traits in
//! [`crate::storage`].

pub mod account_service;
pub mod aggregation_service;
pub mod audit_service;
pub mod commands;
pub mod credential_service;
pub mod dashboard_service;
pub mod errors;
pub mod export_service;
pub mod filter_service;
pub mod models;

pub use account_service::AccountService;
pub use aggregation_service::AggregationService;
pub use audit_service::AuditService;
pub use credential_service::CredentialService;
pub use dashboard_service::DashboardService;
pub use errors::{DashboardError, DashboardResult};
pub use export_service::ExportService;
pub use filter_service::FilterService;
