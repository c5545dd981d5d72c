use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use services::{
    Actor,
    dashboard_service::{DashboardService, DashboardStats},
    user_service::UserService,
};
use util::state::AppState;

use crate::response::{ApiResponse, service_error};
use crate::routes::common::UserResponse;

/// GET /api/me/profile
///
/// The caller's own profile.
pub async fn get_profile(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> impl IntoResponse {
    match UserService::profile(app_state.db(), actor.user_id).await {
        Ok(user) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                UserResponse::from(user),
                "Profile retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<UserResponse>(e),
    }
}

/// GET /api/me/dashboard
///
/// Ticket counters scoped to the caller. Users get counts over their own
/// tickets; agents add `assigned_to_me`; admins add `total_users` and
/// `total_categories`.
///
/// ### Response: 200 OK (agent)
/// ```json
/// {
///   "success": true,
///   "data": {
///     "total": 12,
///     "open": 5,
///     "in_progress": 4,
///     "resolved": 2,
///     "assigned_to_me": 3
///   },
///   "message": "Dashboard retrieved successfully"
/// }
/// ```
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> impl IntoResponse {
    match DashboardService::stats(app_state.db(), actor).await {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Dashboard retrieved successfully")),
        )
            .into_response(),
        Err(e) => service_error::<DashboardStats>(e),
    }
}
