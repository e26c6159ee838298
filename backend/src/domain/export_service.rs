//! Export service domain logic.
//!
//! Re-serializes a record set with the canonical expense headers so the
//! download can be loaded back as a backing file.

use csv::Writer;
use log::info;
use std::io;

use crate::domain::commands::dashboard::CsvExport;
use crate::domain::errors::{DashboardError, DashboardResult};
use crate::domain::models::Record;
use crate::storage::csv::schema::{export_headers, record_to_row};

pub const EXPORT_FILE_NAME: &str = "filtered_expenses.csv";

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    pub fn export_csv(&self, records: &[Record]) -> DashboardResult<CsvExport> {
        let mut csv_writer = Writer::from_writer(Vec::new());
        csv_writer.write_record(export_headers())?;
        for record in records {
            csv_writer.write_record(record_to_row(record))?;
        }

        let bytes = csv_writer
            .into_inner()
            .map_err(|e| DashboardError::Io(e.into_error()))?;
        let content = String::from_utf8(bytes)
            .map_err(|e| DashboardError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        info!("Exported {} records as CSV ({} bytes)", records.len(), content.len());

        Ok(CsvExport {
            file_name: EXPORT_FILE_NAME.to_string(),
            content,
            record_count: records.len(),
        })
    }
}
