use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use db::models::tickets::TicketPriority;
use serde::Deserialize;
use services::{
    Actor,
    ticket_service::{CreateTicket, TicketService},
};
use util::state::AppState;
use validator::Validate;

use super::common::TicketResponse;
use crate::response::{ApiResponse, service_error};
use crate::routes::common::format_validation_errors;

#[derive(Debug, Deserialize, Validate)]
pub struct TicketRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub priority: Option<TicketPriority>,
    pub category_id: Option<i64>,
}

/// Opens a new ticket owned by the caller.
///
/// **Endpoint:** `POST /api/tickets`
/// **Permissions:** Any authenticated user.
///
/// ### Request Body
/// ```json
/// {
///   "title": "VPN down",
///   "description": "Cannot connect since this morning",
///   "priority": "high",
///   "category_id": 2
/// }
/// ```
///
/// ### Responses
/// - `201 Created` → The new ticket, status `open`, unassigned
/// - `400 Bad Request` → Blank title or description
/// - `404 Not Found` → Unknown category
pub async fn create_ticket(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<TicketRequest>,
) -> impl IntoResponse {
    if let Err(validation_errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<TicketResponse>::error(format_validation_errors(
                &validation_errors,
            ))),
        )
            .into_response();
    }

    let params = CreateTicket {
        title: req.title,
        description: req.description,
        priority: req.priority,
        category_id: req.category_id,
    };

    let db = app_state.db();
    let ticket = match TicketService::create(db, actor, params).await {
        Ok(ticket) => ticket,
        Err(e) => return service_error::<TicketResponse>(e),
    };

    match TicketService::with_relations_one(db, ticket).await {
        Ok(ticket) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                TicketResponse::from(ticket),
                "Ticket created successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<TicketResponse>(e),
    }
}
