//! Domain model for an expense record.
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::filter::FilterField;

/// Date formats tried in order. ISO first, then day-first for ambiguous inputs.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y", "%d.%m.%Y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
];

/// One expense entry
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Record {
    pub date: Option<NaiveDate>,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub payment_method: String,
    pub account_used: String,
    pub currency: String,
    pub paid_by: String,
    pub split_with: String,
    pub settled: String,
    pub recurring: String,
    pub frequency: String,
    pub receipt_attached: String,
    pub tags: String,
    pub budget_category: String,
    pub location: String,
}

impl Record {
    /// Raw value of a categorical field
    pub fn field(&self, field: FilterField) -> &str {
        match field {
            FilterField::Category => &self.category,
            FilterField::Subcategory => &self.subcategory,
            FilterField::PaymentMethod => &self.payment_method,
            FilterField::AccountUsed => &self.account_used,
            FilterField::Currency => &self.currency,
            FilterField::PaidBy => &self.paid_by,
            FilterField::SplitWith => &self.split_with,
            FilterField::Settled => &self.settled,
            FilterField::Recurring => &self.recurring,
            FilterField::Frequency => &self.frequency,
            FilterField::ReceiptAttached => &self.receipt_attached,
            FilterField::Tags => &self.tags,
            FilterField::BudgetCategory => &self.budget_category,
            FilterField::Location => &self.location,
        }
    }

    pub fn field_mut(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Category => &mut self.category,
            FilterField::Subcategory => &mut self.subcategory,
            FilterField::PaymentMethod => &mut self.payment_method,
            FilterField::AccountUsed => &mut self.account_used,
            FilterField::Currency => &mut self.currency,
            FilterField::PaidBy => &mut self.paid_by,
            FilterField::SplitWith => &mut self.split_with,
            FilterField::Settled => &mut self.settled,
            FilterField::Recurring => &mut self.recurring,
            FilterField::Frequency => &mut self.frequency,
            FilterField::ReceiptAttached => &mut self.receipt_attached,
            FilterField::Tags => &mut self.tags,
            FilterField::BudgetCategory => &mut self.budget_category,
            FilterField::Location => &mut self.location,
        }
    }
}

/// Parse a calendar date, returning `None` for empty or unparsable input
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date());
        }
    }

    chrono::DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Parse a currency amount. Anything that is not a finite number counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ',' | '₹' | '$' | '€' | '£' | ' '))
        .collect();

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => amount,
        _ => 0.0,
    }
}

/// Comparison form of a categorical value
pub fn normalize_value(raw: &str) -> String {
    raw.trim().to_lowercase()
}
