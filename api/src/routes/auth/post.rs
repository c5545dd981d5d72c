use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use services::user_service::{RegisterUser, UserService};
use util::state::AppState;
use validator::Validate;

use crate::auth::generate_jwt;
use crate::response::{ApiResponse, service_error};
use crate::routes::common::{USERNAME_REGEX, UserResponse, format_validation_errors};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be 3-32 letters, digits, '.', '_' or '-'"
    ))]
    pub username: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: String,
}

fn issue_token(user: db::models::user::Model, status: StatusCode, message: &str) -> Response {
    match generate_jwt(user.id) {
        Ok((token, expires_at)) => (
            status,
            Json(ApiResponse::success(
                AuthResponse {
                    user: UserResponse::from(user),
                    token,
                    expires_at,
                },
                message,
            )),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "token encoding failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::<AuthResponse>::error("Internal server error")),
            )
                .into_response()
        }
    }
}

/// POST /api/auth/register
///
/// Creates an account with role `user` and signs it in.
///
/// ### Request Body
/// ```json
/// {
///   "email": "dana@example.com",
///   "username": "dana",
///   "password": "correct horse"
/// }
/// ```
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "user": { "id": 1, "email": "dana@example.com", "username": "dana", "role": "user", ... },
///     "token": "jwt_token_here",
///     "expires_at": "2026-10-15T11:00:00Z"
///   },
///   "message": "User registered successfully"
/// }
/// ```
///
/// - `400 Bad Request` (validation failure)
/// - `409 Conflict` (email or username taken)
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthResponse>::error(error_message)),
        )
            .into_response();
    }

    let params = RegisterUser {
        email: req.email,
        username: req.username,
        password: req.password,
    };

    match UserService::register(app_state.db(), params).await {
        Ok(user) => issue_token(user, StatusCode::CREATED, "User registered successfully"),
        Err(e) => service_error::<AuthResponse>(e),
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email or username.
    #[serde(alias = "email", alias = "username")]
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /api/auth/login
///
/// Authenticates by email or username and issues a JWT.
///
/// ### Request Body
/// ```json
/// {
///   "login": "dana@example.com",
///   "password": "correct horse"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK` - same payload as register
/// - `400 Bad Request` (missing fields)
/// - `401 Unauthorized`
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Invalid credentials"
/// }
/// ```
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<AuthResponse>::error(error_message)),
        )
            .into_response();
    }

    match UserService::authenticate(app_state.db(), &req.login, &req.password).await {
        Ok(Some(user)) => issue_token(user, StatusCode::OK, "Login successful"),
        Ok(None) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<AuthResponse>::error("Invalid credentials")),
        )
            .into_response(),
        Err(e) => service_error::<AuthResponse>(e),
    }
}
