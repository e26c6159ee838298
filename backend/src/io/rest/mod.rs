//! # REST API Interface Layer
//!
//! HTTP/JSON endpoints for the expense dashboard. Handlers translate DTOs from
//! the `shared` crate into domain commands, call the synchronous domain services
//! and map [`DashboardError`] to status codes with a JSON body:
//!
//! ```json
//! {"error": "Invalid username or password", "code": "INVALID_CREDENTIALS"}
//! ```

pub mod auth_apis;
pub mod dashboard_apis;
pub mod export_apis;
pub mod mappers;
pub mod records_apis;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use log::error;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DashboardError;
use crate::AppState;

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

pub fn status_for(error: &DashboardError) -> StatusCode {
    match error {
        DashboardError::InvalidCredentials | DashboardError::NotAuthenticated => {
            StatusCode::UNAUTHORIZED
        }
        DashboardError::DuplicateUser(_) => StatusCode::CONFLICT,
        DashboardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        DashboardError::Forbidden(_) => StatusCode::FORBIDDEN,
        DashboardError::DataLoad { .. } | DashboardError::Io(_) | DashboardError::Csv(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Convert a domain error into an HTTP response
pub fn error_response(error: DashboardError) -> Response {
    let status = status_for(&error);
    if status.is_server_error() {
        error!("Request failed: {}", error);
    }
    let body = ErrorResponse {
        error: error.to_string(),
        code: error.code().to_string(),
    };
    (status, Json(body)).into_response()
}

/// All API routes, to be nested under `/api`
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(auth_apis::router())
        .merge(dashboard_apis::router())
        .merge(export_apis::router())
        .merge(records_apis::router())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&DashboardError::InvalidCredentials), StatusCode::UNAUTHORIZED);
        assert_eq!(status_for(&DashboardError::NotAuthenticated), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&DashboardError::DuplicateUser("sakshi".to_string())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DashboardError::InvalidInput("x".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DashboardError::Forbidden("x".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&DashboardError::DataLoad {
                path: "s1.csv".to_string(),
                reason: "file not found".to_string()
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
