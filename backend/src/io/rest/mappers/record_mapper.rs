use crate::domain::models::{Record, Role};
use shared::{ExpenseRecord, UserRole};

/// Mapper between domain records and the shared `ExpenseRecord` DTO
pub struct RecordMapper;

impl RecordMapper {
    pub fn to_dto(domain: Record) -> ExpenseRecord {
        ExpenseRecord {
            date: domain.date.map(|date| date.format("%Y-%m-%d").to_string()),
            amount: domain.amount,
            category: domain.category,
            subcategory: domain.subcategory,
            payment_method: domain.payment_method,
            account_used: domain.account_used,
            currency: domain.currency,
            paid_by: domain.paid_by,
            split_with: domain.split_with,
            settled: domain.settled,
            recurring: domain.recurring,
            frequency: domain.frequency,
            receipt_attached: domain.receipt_attached,
            tags: domain.tags,
            budget_category: domain.budget_category,
            location: domain.location,
        }
    }

    pub fn to_dto_role(role: Role) -> UserRole {
        match role {
            Role::User => UserRole::User,
            Role::Admin => UserRole::Admin,
        }
    }
}
