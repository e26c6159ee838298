//! # REST API for the Dashboard View
//!
//! Summary, chart data and rows for the caller's filtered records, plus the
//! choices offered by the filter widgets.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::info;

use super::error_response;
use super::mappers::DashboardMapper;
use crate::AppState;
use shared::{DashboardRequest, SessionRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", post(get_dashboard))
        .route("/dashboard/options", post(get_filter_options))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    Json(request): Json<DashboardRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/dashboard - start: {:?}, end: {:?}, filters: {:?}",
        request.start_date, request.end_date, request.filters
    );

    let query = match DashboardMapper::to_query(request) {
        Ok(query) => query,
        Err(e) => return error_response(e),
    };

    match state.dashboard_service.view(query) {
        Ok(view) => {
            let response = DashboardMapper::to_dashboard_response(view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn get_filter_options(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> impl IntoResponse {
    info!("POST /api/dashboard/options");

    match state.dashboard_service.filter_options(&request.session_id) {
        Ok(options) => {
            let response = DashboardMapper::to_options_response(options);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}
