use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::tickets::TicketStatus;
use serde::Deserialize;
use services::{Actor, ticket_service::TicketService};
use util::state::AppState;

use super::common::TicketResponse;
use crate::response::{ApiResponse, service_error};

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: TicketStatus,
}

/// Moves a ticket to a new status.
///
/// **Endpoint:** `PUT /api/tickets/{ticket_id}/status`
/// **Permissions:** Admins, or the agent the ticket is assigned to (or any
/// agent while it is unassigned). Users cannot change status.
///
/// ### Request Body
/// ```json
/// { "status": "in_progress" }
/// ```
///
/// ### Responses
/// - `200 OK` → Updated ticket
/// - `400 Bad Request` → Ticket already has that status
/// - `403 Forbidden` → Caller cannot manage this ticket
/// - `404 Not Found` → No such ticket
pub async fn update_status(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<StatusRequest>,
) -> impl IntoResponse {
    let db = app_state.db();
    let ticket = match TicketService::update_status(db, actor, ticket_id, req.status).await {
        Ok(ticket) => ticket,
        Err(e) => return service_error::<TicketResponse>(e),
    };

    match TicketService::with_relations_one(db, ticket).await {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketResponse::from(ticket),
                "Ticket status updated",
            )),
        )
            .into_response(),
        Err(e) => service_error::<TicketResponse>(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    /// `null` unassigns.
    pub assignee_id: Option<i64>,
}

/// Sets or clears a ticket's assignee.
///
/// **Endpoint:** `PUT /api/tickets/{ticket_id}/assignee`
/// **Permissions:** Agents and admins who can manage the ticket. An agent
/// claims an unassigned ticket by sending their own id.
///
/// ### Request Body
/// ```json
/// { "assignee_id": 7 }
/// ```
///
/// ### Responses
/// - `200 OK` → Updated ticket
/// - `400 Bad Request` → Assignee is not an agent or admin
/// - `403 Forbidden` → Caller cannot assign, or the ticket belongs to another agent
/// - `404 Not Found` → No such ticket or assignee
pub async fn assign_ticket(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(ticket_id): Path<i64>,
    Json(req): Json<AssignRequest>,
) -> impl IntoResponse {
    let db = app_state.db();
    let ticket = match TicketService::assign(db, actor, ticket_id, req.assignee_id).await {
        Ok(ticket) => ticket,
        Err(e) => return service_error::<TicketResponse>(e),
    };

    match TicketService::with_relations_one(db, ticket).await {
        Ok(ticket) => {
            let message = if ticket.ticket.assigned_to.is_some() {
                "Ticket assigned"
            } else {
                "Ticket unassigned"
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(TicketResponse::from(ticket), message)),
            )
                .into_response()
        }
        Err(e) => service_error::<TicketResponse>(e),
    }
}
