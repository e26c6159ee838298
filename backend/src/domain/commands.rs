//! Domain-level command and query types.
//! These structs are used by services inside the domain layer and are not
//! exposed over the public API. The REST layer maps the DTOs from the `shared`
//! crate to these internal types.

pub mod auth {
    use crate::domain::models::{Identity, User};

    #[derive(Debug, Clone)]
    pub struct LoginCommand {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct LoginResult {
        pub session_id: String,
        pub identity: Identity,
    }

    #[derive(Debug, Clone)]
    pub struct LogoutResult {
        pub identity: Identity,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterCommand {
        pub username: String,
        pub password: String,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterResult {
        pub user: User,
        pub success_message: String,
    }
}

pub mod dashboard {
    use chrono::NaiveDate;
    use std::collections::BTreeMap;

    use crate::domain::models::{FilterField, FilterSpec, Record};

    /// Filter input for the dashboard view and the CSV download
    #[derive(Debug, Clone, Default)]
    pub struct DashboardQuery {
        pub session_id: String,
        pub filter: FilterSpec,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct Summary {
        pub total: f64,
        pub count: usize,
    }

    #[derive(Debug, Clone)]
    pub struct DashboardView {
        pub summary: Summary,
        pub by_category: BTreeMap<String, f64>,
        pub by_date: BTreeMap<NaiveDate, f64>,
        pub records: Vec<Record>,
    }

    #[derive(Debug, Clone)]
    pub struct FilterOptions {
        pub values: Vec<(FilterField, Vec<String>)>,
        pub date_bounds: Option<(NaiveDate, NaiveDate)>,
    }

    #[derive(Debug, Clone)]
    pub struct CsvExport {
        pub file_name: String,
        pub content: String,
        pub record_count: usize,
    }

    #[derive(Debug, Clone)]
    pub struct ReloadResult {
        pub record_count: usize,
    }
}
