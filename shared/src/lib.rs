use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One expense row as shown in the transactions table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Calendar date (YYYY-MM-DD), absent when the source value could not be parsed
    pub date: Option<String>,
    pub amount: f64,
    pub category: String,
    pub subcategory: String,
    pub payment_method: String,
    pub account_used: String,
    pub currency: String,
    /// Username of the person who paid (the owning user)
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

/// Role attached to an authenticated identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Opaque session identifier to send with every dashboard request
    pub session_id: String,
    pub username: String,
    pub role: UserRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutRequest {
    pub session_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub username: String,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub username: String,
    pub success_message: String,
}

/// Request carrying only a session, used by option and reload endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRequest {
    pub session_id: String,
}

/// Filter selections coming from the sidebar widgets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRequest {
    pub session_id: String,
    /// Inclusive start date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// Inclusive end date (YYYY-MM-DD)
    #[serde(default)]
    pub end_date: Option<String>,
    /// Field name -> accepted values. Empty lists impose no constraint.
    #[serde(default)]
    pub filters: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryDto {
    /// Unrounded sum of amounts
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub summary: SummaryDto,
    /// Pie chart data
    pub category_breakdown: Vec<CategoryTotal>,
    /// Line chart data, ascending by date
    pub spending_over_time: Vec<DailyTotal>,
    pub records: Vec<ExpenseRecord>,
    /// True when no record matched; shown as a warning, not an error
    pub is_empty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterFieldOptions {
    /// Field key accepted in `DashboardRequest::filters`
    pub field: String,
    /// Human readable label for the widget
    pub label: String,
    pub values: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptionsResponse {
    pub fields: Vec<FilterFieldOptions>,
    /// Default date range of the visible records
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReloadResponse {
    pub record_count: usize,
    pub success_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_request_defaults() {
        let request: DashboardRequest =
            serde_json::from_str(r#"{"session_id": "abc"}"#).unwrap();

        assert_eq!(request.session_id, "abc");
        assert!(request.start_date.is_none());
        assert!(request.end_date.is_none());
        assert!(request.filters.is_empty());
    }

    #[test]
    fn test_user_role_serializes_lowercase() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"admin\"");

        let role: UserRole = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, UserRole::User);
    }
}
