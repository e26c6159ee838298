//! # REST API for Data Export
//!
//! Downloads the caller's filtered records as a CSV attachment.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::info;

use super::error_response;
use super::mappers::DashboardMapper;
use crate::AppState;
use shared::DashboardRequest;

pub fn router() -> Router<AppState> {
    Router::new().route("/export/csv", post(export_csv))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Json(request): Json<DashboardRequest>,
) -> impl IntoResponse {
    info!("POST /api/export/csv - filters: {:?}", request.filters);

    let query = match DashboardMapper::to_query(request) {
        Ok(query) => query,
        Err(e) => return error_response(e),
    };

    match state.dashboard_service.export(query) {
        Ok(export) => {
            info!("Exporting {} records as {}", export.record_count, export.file_name);
            let headers = [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", export.file_name),
                ),
            ];
            (StatusCode::OK, headers, export.content).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{login, test_app};
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_export_filtered_csv() {
        let (env, app) = test_app();
        let session_id = login(&app, "sakshi", "sakshi123").await;

        let request = Request::builder()
            .method("POST")
            .uri("/api/export/csv")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"session_id": session_id, "filters": {"category": ["travel"]}}).to_string(),
            ))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"filtered_expenses.csv\""
        );
        assert!(response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv"));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let content = String::from_utf8(bytes.to_vec()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("date,amount,category"));
        assert!(lines[1].starts_with("2024-02-10,50,Travel"));

        let audit = env.read_file("audit_log.csv");
        assert!(audit.contains(",sakshi,Download,"));
    }
}
