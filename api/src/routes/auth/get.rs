use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use services::{Actor, user_service::UserService};
use util::state::AppState;

use crate::response::{ApiResponse, service_error};
use crate::routes::common::UserResponse;

/// GET /api/auth/me
///
/// Returns the authenticated user, with the role as currently stored.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 7,
///     "email": "agent@example.com",
///     "username": "agent",
///     "role": "agent",
///     "role_label": "Support Agent",
///     "role_badge": "default",
///     ...
///   },
///   "message": "User data retrieved successfully"
/// }
/// ```
pub async fn get_me(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> impl IntoResponse {
    match UserService::profile(app_state.db(), actor.user_id).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "User data retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<UserResponse>(e),
    }
}
