//! Summary statistics and chart data over a record set.
//!
//! Sums are unrounded `f64`; rounding belongs to presentation.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::domain::commands::dashboard::Summary;
use crate::domain::models::Record;

/// Group key for records with an empty category
pub const UNCATEGORIZED: &str = "(uncategorized)";

#[derive(Clone, Default)]
pub struct AggregationService;

impl AggregationService {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, records: &[Record]) -> Summary {
        Summary {
            total: records.iter().map(|record| record.amount).sum(),
            count: records.len(),
        }
    }

    /// Sum of amounts per category. Every record lands in exactly one group.
    pub fn group_by_category(&self, records: &[Record]) -> BTreeMap<String, f64> {
        let mut groups = BTreeMap::new();
        for record in records {
            let category = record.category.trim();
            let key = if category.is_empty() { UNCATEGORIZED } else { category };
            *groups.entry(key.to_string()).or_insert(0.0) += record.amount;
        }
        groups
    }

    /// Sum of amounts per day, ascending. Undated records are skipped.
    pub fn group_by_date(&self, records: &[Record]) -> BTreeMap<NaiveDate, f64> {
        let mut groups = BTreeMap::new();
        for record in records {
            if let Some(date) = record.date {
                *groups.entry(date).or_insert(0.0) += record.amount;
            }
        }
        groups
    }
}
