//! # Expense CSV Schema
//!
//! Maps the header row of an expense file to known columns. Headers are matched
//! case-insensitively after trimming, and `_` is interchangeable with a space, so
//! `Paid By`, `paid_by` and ` paid by ` all resolve to the same column.
//!
//! ```csv
//! date,amount,category,subcategory,payment method,account used,currency,paid by,...
//! 2024-01-05,100,Food,Groceries,UPI,HDFC,INR,sakshi,...
//! ```
//!
//! The shared-file layout adds `username`, `password` and `usertype` columns that
//! carry credentials on the same table.

use csv::StringRecord;
use std::collections::HashMap;

use crate::domain::models::record::{parse_amount, parse_date};
use crate::domain::models::{FilterField, Record, Role, User};

/// A column the dashboard understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Amount,
    Field(FilterField),
    Username,
    Password,
    UserType,
}

impl Column {
    fn from_header(raw: &str) -> Option<Self> {
        let header = raw.trim().to_lowercase().replace('_', " ");
        match header.as_str() {
            "date" => Some(Column::Date),
            "amount" => Some(Column::Amount),
            "username" | "user name" => Some(Column::Username),
            "password" => Some(Column::Password),
            "usertype" | "user type" | "role" => Some(Column::UserType),
            other => other.parse::<FilterField>().ok().map(Column::Field),
        }
    }
}

/// Headers written when records are serialized back to CSV
pub fn export_headers() -> Vec<&'static str> {
    let mut headers = vec!["date", "amount"];
    headers.extend(FilterField::ALL.iter().map(|field| field.header()));
    headers
}

/// Serialize a record in `export_headers` order
pub fn record_to_row(record: &Record) -> Vec<String> {
    let mut row = Vec::with_capacity(FilterField::ALL.len() + 2);
    row.push(
        record
            .date
            .map(|date| date.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    );
    row.push(record.amount.to_string());
    row.extend(FilterField::ALL.iter().map(|field| record.field(*field).to_string()));
    row
}

/// Column positions resolved from one header row
#[derive(Debug, Clone)]
pub struct ExpenseSchema {
    positions: HashMap<Column, usize>,
}

impl ExpenseSchema {
    /// Resolve the header row. `date` and `amount` are required.
    pub fn from_headers(headers: &StringRecord) -> Result<Self, String> {
        let mut positions = HashMap::new();
        for (index, header) in headers.iter().enumerate() {
            if let Some(column) = Column::from_header(header) {
                // First occurrence wins on duplicated headers
                positions.entry(column).or_insert(index);
            }
        }

        for required in [Column::Date, Column::Amount] {
            if !positions.contains_key(&required) {
                return Err(format!("missing required column {:?}", required).to_lowercase());
            }
        }

        Ok(Self { positions })
    }

    pub fn has(&self, column: Column) -> bool {
        self.positions.contains_key(&column)
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions.get(&column).copied()
    }

    /// Trimmed cell value, empty when the column or cell is absent
    pub fn value<'a>(&self, row: &'a StringRecord, column: Column) -> &'a str {
        self.positions
            .get(&column)
            .and_then(|index| row.get(*index))
            .map(str::trim)
            .unwrap_or("")
    }

    pub fn parse_record(&self, row: &StringRecord) -> Record {
        let mut record = Record {
            date: parse_date(self.value(row, Column::Date)),
            amount: parse_amount(self.value(row, Column::Amount)),
            ..Record::default()
        };
        for field in FilterField::ALL {
            *record.field_mut(field) = self.value(row, Column::Field(field)).to_string();
        }
        record
    }

    /// Credentials carried by a row, when both username and password are present
    pub fn credential(&self, row: &StringRecord) -> Option<User> {
        let username = self.value(row, Column::Username);
        let password = self.value(row, Column::Password);
        if username.is_empty() || password.is_empty() {
            return None;
        }
        let role = Role::parse(self.value(row, Column::UserType));
        Some(User::new(username, password, role))
    }

    /// A registration row: credentials only, no expense data
    pub fn is_credential_only(&self, row: &StringRecord) -> bool {
        !self.value(row, Column::Username).is_empty()
            && self.value(row, Column::Date).is_empty()
            && parse_amount(self.value(row, Column::Amount)) == 0.0
            && FilterField::ALL
                .iter()
                .all(|field| self.value(row, Column::Field(*field)).is_empty())
    }
}
