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

/// GET /api/users
///
/// Lists every user, newest first. Admin only.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "id": 2, "email": "dana@example.com", "username": "dana", "role": "user", ... }
///   ],
///   "message": "Users retrieved successfully"
/// }
/// ```
pub async fn get_users(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> impl IntoResponse {
    match UserService::list(app_state.db(), actor).await {
        Ok(users) => {
            let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Users retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => service_error::<Vec<UserResponse>>(e),
    }
}
