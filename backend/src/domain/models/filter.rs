//! Filter specification model
//!
//! A [`FilterSpec`] holds one set of accepted values per categorical field plus an
//! optional inclusive date range. Values are stored in their comparison form
//! (trimmed, lower-cased), so matching never re-normalizes the constraint side.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::record::normalize_value;
use crate::domain::errors::DashboardError;

/// Categorical columns the dashboard can filter on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    Category,
    Subcategory,
    PaymentMethod,
    AccountUsed,
    Currency,
    PaidBy,
    SplitWith,
    Settled,
    Recurring,
    Frequency,
    ReceiptAttached,
    Tags,
    BudgetCategory,
    Location,
}

impl FilterField {
    /// Every filterable field, in sidebar order
    pub const ALL: [FilterField; 14] = [
        FilterField::Category,
        FilterField::Subcategory,
        FilterField::PaymentMethod,
        FilterField::AccountUsed,
        FilterField::Currency,
        FilterField::PaidBy,
        FilterField::SplitWith,
        FilterField::Settled,
        FilterField::Recurring,
        FilterField::Frequency,
        FilterField::ReceiptAttached,
        FilterField::Tags,
        FilterField::BudgetCategory,
        FilterField::Location,
    ];

    /// Key used in requests and configuration
    pub fn key(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::PaymentMethod => "payment_method",
            Self::AccountUsed => "account_used",
            Self::Currency => "currency",
            Self::PaidBy => "paid_by",
            Self::SplitWith => "split_with",
            Self::Settled => "settled",
            Self::Recurring => "recurring",
            Self::Frequency => "frequency",
            Self::ReceiptAttached => "receipt_attached",
            Self::Tags => "tags",
            Self::BudgetCategory => "budget_category",
            Self::Location => "location",
        }
    }

    /// Canonical CSV header
    pub fn header(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::PaymentMethod => "payment method",
            Self::AccountUsed => "account used",
            Self::Currency => "currency",
            Self::PaidBy => "paid by",
            Self::SplitWith => "split with",
            Self::Settled => "settled",
            Self::Recurring => "recurring",
            Self::Frequency => "frequency",
            Self::ReceiptAttached => "bill/receipt attached",
            Self::Tags => "tags",
            Self::BudgetCategory => "budget category",
            Self::Location => "location",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Subcategory => "Subcategory",
            Self::PaymentMethod => "Payment Method",
            Self::AccountUsed => "Account Used",
            Self::Currency => "Currency",
            Self::PaidBy => "Paid By",
            Self::SplitWith => "Split With",
            Self::Settled => "Settled",
            Self::Recurring => "Recurring",
            Self::Frequency => "Frequency",
            Self::ReceiptAttached => "Bill/Receipt Attached",
            Self::Tags => "Tags",
            Self::BudgetCategory => "Budget Category",
            Self::Location => "Location",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterField {
    type Err = DashboardError;

    /// Accepts the request key, the CSV header or the label, in any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', " ");
        FilterField::ALL
            .into_iter()
            .find(|field| {
                field.key().replace('_', " ") == wanted
                    || field.header() == wanted
                    || field.label().to_lowercase() == wanted
            })
            .or(match wanted.as_str() {
                "receipt" | "receipt attached" => Some(FilterField::ReceiptAttached),
                _ => None,
            })
            .ok_or_else(|| DashboardError::InvalidInput(format!("unknown filter field '{}'", s)))
    }
}

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DashboardError> {
        if start > end {
            return Err(DashboardError::InvalidInput(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Combined field-value and date constraints chosen by the caller
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    constraints: BTreeMap<FilterField, BTreeSet<String>>,
    date_range: Option<DateRange>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add accepted values for a field. Blank values are ignored, so an all-blank
    /// selection leaves the field unconstrained.
    pub fn with_values<I, S>(mut self, field: FilterField, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let accepted = self.constraints.entry(field).or_default();
        accepted.extend(
            values
                .into_iter()
                .map(|v| normalize_value(v.as_ref()))
                .filter(|v| !v.is_empty()),
        );
        if accepted.is_empty() {
            self.constraints.remove(&field);
        }
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    pub fn constraint(&self, field: FilterField) -> Option<&BTreeSet<String>> {
        self.constraints.get(&field)
    }

    pub fn constraints(&self) -> impl Iterator<Item = (FilterField, &BTreeSet<String>)> {
        self.constraints.iter().map(|(field, values)| (*field, values))
    }

    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    /// True when neither field constraints nor a date range are set
    pub fn is_unconstrained(&self) -> bool {
        self.constraints.is_empty() && self.date_range.is_none()
    }
}
