use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::{Actor, category_service::CategoryService};
use util::state::AppState;
use validator::Validate;

use super::common::{CategoryRequest, CategoryResponse};
use crate::response::{ApiResponse, service_error};
use crate::routes::common::format_validation_errors;

/// PUT /api/categories/{category_id}
///
/// Replaces a category's name and description; the color is kept when
/// omitted. Admin only.
///
/// ### Responses
/// - `200 OK` → Updated category
/// - `400 Bad Request` → Blank name or malformed color
/// - `403 Forbidden` → Caller is not an admin
/// - `404 Not Found` → No such category
/// - `409 Conflict` → Name already in use
pub async fn edit_category(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(category_id): Path<i64>,
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

    match CategoryService::update(app_state.db(), actor, category_id, req.into()).await {
        Ok(category) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                CategoryResponse::from(category),
                "Category updated successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<CategoryResponse>(e),
    }
}
