//! Ticket routes module.
//!
//! Provides the `/tickets` route group: creation, listing, detail, status
//! changes, assignment and the nested comment thread. Every route requires
//! authentication; finer access decisions happen in the ticket services.

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod comments;
pub mod common;
pub mod get;
pub mod post;
pub mod put;

use comments::comment_routes;
use get::{get_assignees, get_ticket, get_tickets};
use post::create_ticket;
use put::{assign_ticket, update_status};

/// Builds the `/tickets` route group.
///
/// Routes:
/// - `GET  /tickets`                       → List visible tickets
/// - `POST /tickets`                       → Create a ticket
/// - `GET  /tickets/assignees`             → Assignable agents
/// - `GET  /tickets/{ticket_id}`           → Ticket detail
/// - `PUT  /tickets/{ticket_id}/status`    → Change status
/// - `PUT  /tickets/{ticket_id}/assignee`  → Claim, assign or unassign
///
/// Nested:
/// - `/{ticket_id}/comments` → `comment_routes`
pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_tickets).post(create_ticket))
        .route("/assignees", get(get_assignees))
        .route("/{ticket_id}", get(get_ticket))
        .route("/{ticket_id}/status", put(update_status))
        .route("/{ticket_id}/assignee", put(assign_ticket))
        .nest("/{ticket_id}/comments", comment_routes())
}
