//! Filter engine for expense records.
//!
//! A record passes when, for every constrained field, its normalized value is
//! one of the accepted values (OR within a field, AND across fields) and, when
//! a date range is set, its date lies inside it. Records without a date never
//! pass a date range.

use chrono::NaiveDate;

use crate::domain::models::record::normalize_value;
use crate::domain::models::{FilterField, FilterSpec, Record};

#[derive(Clone, Default)]
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    /// Whether a single record satisfies every constraint
    pub fn matches(&self, record: &Record, spec: &FilterSpec) -> bool {
        if let Some(range) = spec.date_range() {
            match record.date {
                Some(date) if range.contains(date) => {}
                _ => return false,
            }
        }

        spec.constraints()
            .all(|(field, accepted)| accepted.contains(&normalize_value(record.field(field))))
    }

    /// Records satisfying `spec`, in input order
    pub fn apply(&self, records: &[Record], spec: &FilterSpec) -> Vec<Record> {
        if spec.is_unconstrained() {
            return records.to_vec();
        }
        records
            .iter()
            .filter(|record| self.matches(record, spec))
            .cloned()
            .collect()
    }

    /// Distinct non-empty values per field, in first-seen order
    pub fn options(&self, records: &[Record]) -> Vec<(FilterField, Vec<String>)> {
        FilterField::ALL
            .iter()
            .map(|field| {
                let mut seen = std::collections::HashSet::new();
                let values = records
                    .iter()
                    .map(|record| record.field(*field).trim())
                    .filter(|value| !value.is_empty())
                    .filter(|value| seen.insert(normalize_value(value)))
                    .map(str::to_string)
                    .collect();
                (*field, values)
            })
            .collect()
    }

    /// Earliest and latest date in `records`, if any record is dated
    pub fn date_bounds(&self, records: &[Record]) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = records.iter().filter_map(|record| record.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(min, max), date| (min.min(date), max.max(date))))
    }
}
