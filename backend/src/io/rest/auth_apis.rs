//! # REST API for Authentication
//!
//! Login, logout and registration.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::post,
    Router,
};
use log::{info, warn};

use super::error_response;
use super::mappers::RecordMapper;
use crate::domain::commands::auth::{LoginCommand, RegisterCommand};
use crate::AppState;
use shared::{
    LoginRequest, LoginResponse, LogoutRequest, LogoutResponse, RegisterRequest, RegisterResponse,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/register", post(register))
}

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/login - username: {}", request.username.trim());

    let command = LoginCommand {
        username: request.username,
        password: request.password,
    };

    match state.account_service.login(command) {
        Ok(result) => {
            let response = LoginResponse {
                session_id: result.session_id,
                username: result.identity.username,
                role: RecordMapper::to_dto_role(result.identity.role),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Login failed: {}", e);
            error_response(e)
        }
    }
}

pub async fn logout(
    State(state): State<AppState>,
    Json(request): Json<LogoutRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/logout");

    match state.account_service.logout(&request.session_id) {
        Ok(result) => {
            let response = LogoutResponse {
                username: result.identity.username,
                success_message: result.success_message,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response(e),
    }
}

pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> impl IntoResponse {
    info!("POST /api/auth/register - username: {}", request.username.trim());

    let command = RegisterCommand {
        username: request.username,
        password: request.password,
    };

    match state.account_service.register(command) {
        Ok(result) => {
            let response = RegisterResponse {
                username: result.user.username,
                success_message: result.success_message,
            };
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Registration failed: {}", e);
            error_response(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{login as api_login, parse, post_json, test_app};
    use super::super::ErrorResponse;
    use axum::http::StatusCode;
    use serde_json::json;
    use shared::{LoginResponse, LogoutResponse, RegisterResponse, UserRole};

    #[tokio::test]
    async fn test_login_success() {
        let (_env, app) = test_app();

        let (status, body) = post_json(
            &app,
            "/api/auth/login",
            json!({"username": "Admin", "password": "admin123"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let response: LoginResponse = parse(&body);
        assert_eq!(response.username, "admin");
        assert_eq!(response.role, UserRole::Admin);
        assert!(!response.session_id.is_empty());
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let (env, app) = test_app();

        let (status, body) = post_json(
            &app,
            "/api/auth/login",
            json!({"username": "sakshi", "password": "nope"}),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(parse::<ErrorResponse>(&body).code, "INVALID_CREDENTIALS");
        assert!(!env.path("audit_log.csv").exists());
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let (_env, app) = test_app();
        let session_id = api_login(&app, "sakshi", "sakshi123").await;

        let (status, body) = post_json(&app, "/api/auth/logout", json!({"session_id": session_id})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(parse::<LogoutResponse>(&body).username, "sakshi");

        let (status, _) = post_json(&app, "/api/auth/logout", json!({"session_id": session_id})).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_and_duplicate() {
        let (env, app) = test_app();

        let (status, body) = post_json(
            &app,
            "/api/auth/register",
            json!({"username": "Riya", "password": "riya-pw"}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(parse::<RegisterResponse>(&body).username, "riya");
        api_login(&app, "riya", "riya-pw").await;

        let before = env.read_file("s1.csv");
        let (status, body) = post_json(
            &app,
            "/api/auth/register",
            json!({"username": "sakshi", "password": "x"}),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(parse::<ErrorResponse>(&body).code, "DUPLICATE_USER");
        assert_eq!(env.read_file("s1.csv"), before);
    }
}
