//! User administration routes, mounted behind the `allow_admin` guard.

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod get;
pub mod put;

use get::get_users;
use put::update_user_role;

/// - `GET /users`                 → All users, newest first
/// - `PUT /users/{user_id}/role`  → Change a user's role
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_users))
        .route("/{user_id}/role", put(update_user_role))
}
