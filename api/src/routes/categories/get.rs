use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use services::category_service::CategoryService;
use util::state::AppState;

use super::common::CategoryResponse;
use crate::response::{ApiResponse, service_error};

/// GET /api/categories
///
/// All categories ordered by name.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": [
///     { "id": 1, "name": "Hardware", "description": null, "color": "#6b7280", ... }
///   ],
///   "message": "Categories retrieved successfully"
/// }
/// ```
pub async fn get_categories(State(app_state): State<AppState>) -> impl IntoResponse {
    match CategoryService::list(app_state.db()).await {
        Ok(categories) => {
            let response: Vec<CategoryResponse> =
                categories.into_iter().map(CategoryResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Categories retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => service_error::<Vec<CategoryResponse>>(e),
    }
}
