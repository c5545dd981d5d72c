use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use services::{
    Actor,
    user_service::{UpdateProfile, UserService},
};
use util::state::AppState;
use validator::Validate;

use crate::response::{ApiResponse, service_error};
use crate::routes::common::{USERNAME_REGEX, UserResponse, format_validation_errors};

#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(regex(
        path = *USERNAME_REGEX,
        message = "Username must be 3-32 letters, digits, '.', '_' or '-'"
    ))]
    pub username: Option<String>,

    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: Option<String>,

    /// Empty string clears the avatar.
    pub avatar_url: Option<String>,
}

fn is_valid_avatar(url: &str) -> bool {
    let url = url.trim();
    url.is_empty() || url.starts_with("https://") || url.starts_with("http://")
}

/// PUT /api/me/profile
///
/// Edits the caller's own profile. Omitted fields are left alone; an empty
/// `full_name` or `avatar_url` clears it. The role cannot be changed here.
///
/// ### Request Body
/// ```json
/// { "full_name": "Dana Scully", "avatar_url": "https://example.com/d.png" }
/// ```
///
/// ### Responses
/// - `200 OK` → Updated profile
/// - `400 Bad Request` → Validation failure
/// - `409 Conflict` → Username taken
pub async fn update_profile(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<ProfileRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        )
            .into_response();
    }

    if let Some(url) = req.avatar_url.as_deref() {
        if !is_valid_avatar(url) {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<UserResponse>::error("Avatar must be an http(s) URL")),
            )
                .into_response();
        }
    }

    let params = UpdateProfile {
        username: req.username,
        full_name: req.full_name,
        avatar_url: req.avatar_url,
    };

    match UserService::update_profile(app_state.db(), actor, params).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "Profile updated successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<UserResponse>(e),
    }
}
