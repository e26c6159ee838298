//! # REST API for Record Store Maintenance

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::info;

use super::error_response;
use crate::AppState;
use shared::{ReloadResponse, SessionRequest};

pub fn router() -> Router<AppState> {
    Router::new().route("/records/reload", post(reload_records))
}

/// Re-read the backing files. Admin only.
pub async fn reload_records(
    State(state): State<AppState>,
    Json(request): Json<SessionRequest>,
) -> impl IntoResponse {
    info!("POST /api/records/reload");

    match state.dashboard_service.reload(&request.session_id) {
        Ok(result) => {
            let response = ReloadResponse {
                record_count: result.record_count,
                success_message: format!("Reloaded {} records", result.record_count),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}
