//! Storage layer: traits used by the domain services and their file-backed
//! and in-memory implementations.

pub mod cache;
pub mod csv;
pub mod memory_user_repository;
pub mod traits;

pub use memory_user_repository::InMemoryUserRepository;
pub use traits::{AuditStorage, RecordStorage, UserRepository};
