use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use services::{Actor, category_service::CategoryService};
use util::state::AppState;

use crate::response::{ApiResponse, service_error};

#[derive(Debug, Serialize, Default)]
pub struct DeleteResponse {
    pub detached_tickets: u64,
}

/// DELETE /api/categories/{category_id}
///
/// Deletes a category. Tickets that referenced it keep existing with no
/// category. Admin only.
///
/// ### Response: 200 OK
/// ```json
/// {
///   "success": true,
///   "data": { "detached_tickets": 4 },
///   "message": "Category deleted successfully"
/// }
/// ```
/// - `403 Forbidden` → Caller is not an admin
/// - `404 Not Found` → No such category
pub async fn delete_category(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(category_id): Path<i64>,
) -> impl IntoResponse {
    match CategoryService::delete(app_state.db(), actor, category_id).await {
        Ok(detached_tickets) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                DeleteResponse { detached_tickets },
                "Category deleted successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<DeleteResponse>(e),
    }
}
