use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use services::{Actor, comment_service::CommentService};
use util::state::AppState;

use super::common::CommentResponse;
use crate::response::{ApiResponse, service_error};

/// Retrieves the comment thread of a ticket.
///
/// **Endpoint:** `GET /api/tickets/{ticket_id}/comments`
/// **Permissions:** Anyone who can see the ticket. Internal comments are
/// left out for users.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1,
///       "ticket_id": 3,
///       "content": "Any news?",
///       "is_internal": false,
///       "author": { "id": 2, "username": "dana", "display_name": "dana", "role": "user" },
///       "created_at": "2026-10-15T09:00:00Z"
///     }
///   ],
///   "message": "Comments retrieved successfully"
/// }
/// ```
/// - `403 Forbidden` → Caller may not see the ticket
/// - `404 Not Found` → No such ticket
pub async fn get_comments(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(ticket_id): Path<i64>,
) -> impl IntoResponse {
    match CommentService::list(app_state.db(), actor, ticket_id).await {
        Ok(comments) => {
            let response: Vec<CommentResponse> =
                comments.into_iter().map(CommentResponse::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Comments retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => service_error::<Vec<CommentResponse>>(e),
    }
}
