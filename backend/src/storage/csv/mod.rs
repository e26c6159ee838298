//! # CSV Storage Module
//!
//! File-backed storage for the expense dashboard. Two record layouts are
//! supported, chosen per deployment:
//!
//! - a single shared table holding expenses and credentials
//!   ([`RecordRepository`])
//! - a `users.csv` credential file plus one `expenses.csv` per user
//!   ([`PerUserRepository`])
//!
//! The audit log is a separate append-only CSV ([`AuditRepository`]).

pub mod audit_repository;
pub mod connection;
pub mod per_user_repository;
pub mod record_repository;
pub mod schema;

#[cfg(test)]
pub mod test_utils;

pub use audit_repository::AuditRepository;
pub use connection::CsvConnection;
pub use per_user_repository::PerUserRepository;
pub use record_repository::RecordRepository;
