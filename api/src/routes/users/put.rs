use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use services::{Actor, user_service::UserService};
use util::state::AppState;

use crate::response::{ApiResponse, service_error};
use crate::routes::common::{UserResponse, parse_role};

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

/// PUT /api/users/{user_id}/role
///
/// Changes a user's role. Admin only; an admin cannot change their own role.
///
/// ### Request Body
/// ```json
/// { "role": "agent" }
/// ```
///
/// ### Responses
/// - `200 OK` → Updated user
/// - `400 Bad Request` → Unknown role, or an admin targeting themselves
/// - `403 Forbidden` → Caller is not an admin
/// - `404 Not Found` → No such user
pub async fn update_user_role(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<i64>,
    Json(req): Json<RoleRequest>,
) -> impl IntoResponse {
    let Some(role) = parse_role(&req.role) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<UserResponse>::error(format!(
                "Invalid role: {}",
                req.role
            ))),
        )
            .into_response();
    };

    match UserService::set_role(app_state.db(), actor, user_id, role).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "Role updated successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<UserResponse>(e),
    }
}
