//! Dashboard orchestration.
//!
//! Resolves the session, takes the records visible to that identity, narrows
//! them with the filter engine and hands the result to aggregation or export.

use log::{info, warn};
use std::sync::Arc;

use crate::domain::account_service::AccountService;
use crate::domain::aggregation_service::AggregationService;
use crate::domain::audit_service::AuditService;
use crate::domain::commands::dashboard::{
    CsvExport, DashboardQuery, DashboardView, FilterOptions, ReloadResult,
};
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::export_service::ExportService;
use crate::domain::filter_service::FilterService;
use crate::domain::models::{AuditAction, Identity, Record};
use crate::storage::RecordStorage;

#[derive(Clone)]
pub struct DashboardService {
    records: Arc<dyn RecordStorage>,
    accounts: AccountService,
    audit: AuditService,
    filter_service: FilterService,
    aggregation_service: AggregationService,
    export_service: ExportService,
}

impl DashboardService {
    pub fn new(records: Arc<dyn RecordStorage>, accounts: AccountService, audit: AuditService) -> Self {
        Self {
            records,
            accounts,
            audit,
            filter_service: FilterService::new(),
            aggregation_service: AggregationService::new(),
            export_service: ExportService::new(),
        }
    }

    fn filtered(&self, query: &DashboardQuery) -> DashboardResult<(Identity, Vec<Record>)> {
        let identity = self.accounts.identity(&query.session_id)?;
        let visible = self.records.records_for(&identity)?;
        let filtered = self.filter_service.apply(&visible, &query.filter);
        Ok((identity, filtered))
    }

    /// Summary, chart data and rows for the caller's filtered records
    pub fn view(&self, query: DashboardQuery) -> DashboardResult<DashboardView> {
        let (identity, records) = self.filtered(&query)?;

        let view = DashboardView {
            summary: self.aggregation_service.summarize(&records),
            by_category: self.aggregation_service.group_by_category(&records),
            by_date: self.aggregation_service.group_by_date(&records),
            records,
        };

        info!(
            "Dashboard for {}: {} records, total {}",
            identity.username, view.summary.count, view.summary.total
        );
        self.audit.record(
            &identity.username,
            AuditAction::ViewedData,
            format!("{} records", view.summary.count),
        );

        Ok(view)
    }

    /// Multiselect choices and default date range for the caller's records
    pub fn filter_options(&self, session_id: &str) -> DashboardResult<FilterOptions> {
        let identity = self.accounts.identity(session_id)?;
        let visible = self.records.records_for(&identity)?;

        Ok(FilterOptions {
            values: self.filter_service.options(&visible),
            date_bounds: self.filter_service.date_bounds(&visible),
        })
    }

    /// The caller's filtered records as a CSV download
    pub fn export(&self, query: DashboardQuery) -> DashboardResult<CsvExport> {
        let (identity, records) = self.filtered(&query)?;
        let export = self.export_service.export_csv(&records)?;

        self.audit.record(
            &identity.username,
            AuditAction::Download,
            format!("{} ({} records)", export.file_name, export.record_count),
        );

        Ok(export)
    }

    /// Force the record store to re-read its backing files. Admin only.
    pub fn reload(&self, session_id: &str) -> DashboardResult<ReloadResult> {
        let identity = self.accounts.identity(session_id)?;
        if !identity.is_admin() {
            warn!("Reload refused for non-admin {}", identity.username);
            return Err(DashboardError::Forbidden(
                "only admins may reload records".to_string(),
            ));
        }

        let records = self.records.reload()?;
        info!("{} reloaded {} records", identity.username, records.len());
        Ok(ReloadResult {
            record_count: records.len(),
        })
    }
}
