use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use services::{Actor, category_service::CategoryService};
use util::state::AppState;
use validator::Validate;

use super::common::{CategoryRequest, CategoryResponse};
use crate::response::{ApiResponse, service_error};
use crate::routes::common::format_validation_errors;

/// POST /api/categories
///
/// Creates a category. Admin only.
///
/// ### Request Body
/// ```json
/// { "name": "Network", "description": "VPN, Wi-Fi", "color": "#2563eb" }
/// ```
///
/// ### Responses
/// - `201 Created` → The new category
/// - `400 Bad Request` → Blank name or malformed color
/// - `403 Forbidden` → Caller is not an admin
/// - `409 Conflict` → Name already in use
pub async fn create_category(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CategoryRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CategoryResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        )
            .into_response();
    }

    match CategoryService::create(app_state.db(), actor, req.into()).await {
        Ok(category) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CategoryResponse::from(category),
                "Category created successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<CategoryResponse>(e),
    }
}
