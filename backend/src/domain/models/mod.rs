pub mod audit_entry;
pub mod filter;
pub mod record;
pub mod user;

pub use audit_entry::{AuditAction, AuditEntry};
pub use filter::{DateRange, FilterField, FilterSpec};
pub use record::Record;
pub use user::{Identity, Role, User};
