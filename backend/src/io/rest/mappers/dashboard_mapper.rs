//! Conversion between dashboard DTOs and domain queries/results.

use chrono::NaiveDate;

use super::record_mapper::RecordMapper;
use crate::domain::commands::dashboard::{DashboardQuery, DashboardView, FilterOptions};
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::models::record::parse_date;
use crate::domain::models::{DateRange, FilterField, FilterSpec};
use shared::{
    CategoryTotal, DailyTotal, DashboardRequest, DashboardResponse, FilterFieldOptions,
    FilterOptionsResponse, SummaryDto,
};

pub struct DashboardMapper;

impl DashboardMapper {
    /// Build a domain query. A missing bound leaves that side of the range open;
    /// both missing means no date constraint.
    pub fn to_query(request: DashboardRequest) -> DashboardResult<DashboardQuery> {
        let mut filter = FilterSpec::new();

        for (key, values) in &request.filters {
            let field: FilterField = key.parse()?;
            filter = filter.with_values(field, values);
        }

        let start = Self::parse_bound(request.start_date.as_deref(), "start_date")?;
        let end = Self::parse_bound(request.end_date.as_deref(), "end_date")?;
        if start.is_some() || end.is_some() {
            let range = DateRange::new(
                start.unwrap_or(NaiveDate::MIN),
                end.unwrap_or(NaiveDate::MAX),
            )?;
            filter = filter.with_date_range(range);
        }

        Ok(DashboardQuery {
            session_id: request.session_id,
            filter,
        })
    }

    fn parse_bound(raw: Option<&str>, name: &str) -> DashboardResult<Option<NaiveDate>> {
        match raw.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => parse_date(value)
                .map(Some)
                .ok_or_else(|| DashboardError::InvalidInput(format!("invalid {}: '{}'", name, value))),
        }
    }

    pub fn to_dashboard_response(view: DashboardView) -> DashboardResponse {
        DashboardResponse {
            summary: SummaryDto {
                total: view.summary.total,
                count: view.summary.count,
            },
            category_breakdown: view
                .by_category
                .into_iter()
                .map(|(category, amount)| CategoryTotal { category, amount })
                .collect(),
            spending_over_time: view
                .by_date
                .into_iter()
                .map(|(date, amount)| DailyTotal {
                    date: date.format("%Y-%m-%d").to_string(),
                    amount,
                })
                .collect(),
            is_empty: view.records.is_empty(),
            records: view.records.into_iter().map(RecordMapper::to_dto).collect(),
        }
    }

    pub fn to_options_response(options: FilterOptions) -> FilterOptionsResponse {
        let (min_date, max_date) = match options.date_bounds {
            Some((min, max)) => (
                Some(min.format("%Y-%m-%d").to_string()),
                Some(max.format("%Y-%m-%d").to_string()),
            ),
            None => (None, None),
        };

        FilterOptionsResponse {
            fields: options
                .values
                .into_iter()
                .map(|(field, values)| FilterFieldOptions {
                    field: field.key().to_string(),
                    label: field.label().to_string(),
                    values,
                })
                .collect(),
            min_date,
            max_date,
        }
    }
}
