use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use db::models::tickets::TicketStatus;
use serde::{Deserialize, Serialize};
use services::{
    Actor,
    ticket_service::{TicketQuery, TicketService},
};
use util::state::AppState;

use super::common::{TicketDetailResponse, TicketResponse};
use crate::response::{ApiResponse, service_error};
use crate::routes::common::UserSummary;

#[derive(Debug, Deserialize)]
pub struct FilterReq {
    pub page: Option<u64>,
    pub per_page: Option<u64>,
    pub query: Option<String>,
    pub status: Option<String>,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub assigned_to_me: bool,
    pub sort: Option<String>,
}

#[derive(Serialize, Default)]
pub struct FilterResponse {
    pub tickets: Vec<TicketResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// Lists tickets visible to the caller.
///
/// **Endpoint:** `GET /api/tickets`
/// **Permissions:** Authenticated. Users only ever see tickets they created;
/// agents and admins see all tickets.
///
/// ### Query parameters
/// - `page`           → Page number (default: 1)
/// - `per_page`       → Items per page (default: 20, max: 100)
/// - `query`          → Case-insensitive search on title and description
/// - `status`         → `open`, `in_progress`, `resolved` or `closed`
/// - `category_id`    → Only tickets in this category
/// - `assigned_to_me` → `true` to list only tickets assigned to the caller
/// - `sort`           → Comma-separated `created_at`, `updated_at`, `priority`, `status`;
///                      prefix `-` for descending (default: `-created_at`)
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "tickets": [ { "id": 3, "title": "VPN down", "status": "open", ... } ],
///     "page": 1,
///     "per_page": 20,
///     "total": 1
///   },
///   "message": "Tickets retrieved successfully"
/// }
/// ```
/// - `400 Bad Request` → Invalid status, sort field or paging
pub async fn get_tickets(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<FilterReq>,
) -> impl IntoResponse {
    let status = match params.status.as_deref() {
        Some(raw) => match raw.parse::<TicketStatus>() {
            Ok(status) => Some(status),
            Err(_) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<FilterResponse>::error(format!("Invalid status: {raw}"))),
                )
                    .into_response();
            }
        },
        None => None,
    };

    let query = TicketQuery {
        page: params.page,
        per_page: params.per_page,
        status,
        category_id: params.category_id,
        assigned_to_me: params.assigned_to_me,
        query: params.query,
        sort: params.sort,
    };

    let db = app_state.db();
    let page = match TicketService::list(db, actor, query).await {
        Ok(page) => page,
        Err(e) => return service_error::<FilterResponse>(e),
    };

    match TicketService::with_relations(db, page.tickets).await {
        Ok(tickets) => {
            let response = FilterResponse {
                tickets: tickets.into_iter().map(TicketResponse::from).collect(),
                page: page.page,
                per_page: page.per_page,
                total: page.total,
            };
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Tickets retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => service_error::<FilterResponse>(e),
    }
}

/// Retrieves one ticket with the caller's permissions on it.
///
/// **Endpoint:** `GET /api/tickets/{ticket_id}`
///
/// ### Responses
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "id": 3,
///     "title": "VPN down",
///     "status": "open",
///     "assigned_to": null,
///     "creator": { "id": 7, "username": "dana", "display_name": "Dana Lee", "role": "user" },
///     "assignee": null,
///     "category": { "id": 2, "name": "Network", "color": "#2563eb" },
///     "permissions": {
///       "can_manage": true,
///       "can_assign": true,
///       "can_comment_internal": true,
///       "allowed_statuses": ["in_progress", "resolved", "closed"]
///     },
///     ...
///   },
///   "message": "Ticket retrieved successfully"
/// }
/// ```
/// - `403 Forbidden` → Caller may not see this ticket
/// - `404 Not Found` → No such ticket
pub async fn get_ticket(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(ticket_id): Path<i64>,
) -> impl IntoResponse {
    let db = app_state.db();
    let ticket = match TicketService::get(db, actor, ticket_id).await {
        Ok(ticket) => ticket,
        Err(e) => return service_error::<TicketDetailResponse>(e),
    };

    match TicketService::with_relations_one(db, ticket).await {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                TicketDetailResponse::new(actor, ticket),
                "Ticket retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => service_error::<TicketDetailResponse>(e),
    }
}

/// Lists the users a ticket can be assigned to (agents and admins).
///
/// **Endpoint:** `GET /api/tickets/assignees`
/// **Permissions:** Agents and admins.
///
/// ### Responses
/// - `200 OK`
/// ```json
/// [{ "id": 7, "username": "agent", "display_name": "Agent Smith", "role": "agent" }]
/// ```
/// - `403 Forbidden` → Caller cannot assign tickets
pub async fn get_assignees(
    State(app_state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> impl IntoResponse {
    match TicketService::assignable_agents(app_state.db(), actor).await {
        Ok(users) => {
            let response: Vec<UserSummary> = users.iter().map(UserSummary::from).collect();
            (
                StatusCode::OK,
                Json(ApiResponse::success(response, "Assignees retrieved successfully")),
            )
                .into_response()
        }
        Err(e) => service_error::<Vec<UserSummary>>(e),
    }
}
