use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use services::{Actor, comment_service::CommentService};
use util::state::AppState;
use validator::Validate;

use super::common::CommentResponse;
use crate::response::{ApiResponse, service_error};
use crate::routes::common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct CommentRequest {
    #[validate(length(min = 1, max = 5000, message = "Comment must be 1-5000 characters"))]
    pub content: String,

    #[serde(default)]
    pub is_internal: bool,
}

/// Adds a comment to a ticket.
///
/// **Endpoint:** `POST /api/tickets/{ticket_id}/comments`
/// **Permissions:** Anyone who can see the ticket; `is_internal` is
/// reserved for agents and admins.
///
/// ### Request Body
/// ```json
/// { "content": "Restarted the gateway", "is_internal": true }
/// ```
///
/// ### Responses
/// - `201 Created` → The new comment
/// - `400 Bad Request` → Empty content
/// - `403 Forbidden` → Ticket not visible, or internal note from a user
/// - `404 Not Found` → No such ticket
pub async fn create_comment(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<CommentRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<CommentResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        )
            .into_response();
    }

    let db = app_state.db();
    match CommentService::add(db, actor, ticket_id, &req.content, req.is_internal).await {
        Ok((comment, author)) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                CommentResponse::from((comment, Some(author))),
                "Comment added successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<CommentResponse>(e),
    }
}
