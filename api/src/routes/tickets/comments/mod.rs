//! Comment thread under `/tickets/{ticket_id}/comments`.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod common;
pub mod get;
pub mod post;

use get::get_comments;
use post::create_comment;

/// - `GET  /tickets/{ticket_id}/comments` → Thread, oldest first
/// - `POST /tickets/{ticket_id}/comments` → Add a comment
pub fn comment_routes() -> Router<AppState> {
    Router::new().route("/", get(get_comments).post(create_comment))
}
