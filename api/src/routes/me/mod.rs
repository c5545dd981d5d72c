//! Routes scoped to the authenticated caller under `/me`.

use axum::{Router, routing::get};
use util::state::AppState;

pub mod get;
pub mod put;

use get::{get_dashboard, get_profile};
use put::update_profile;

/// - `GET /me/profile`   → Own profile
/// - `PUT /me/profile`   → Edit own profile
/// - `GET /me/dashboard` → Ticket counters for the caller's role
pub fn me_routes() -> Router<AppState> {
    Router::new()
        .route("/profile", get(get_profile).put(update_profile))
        .route("/dashboard", get(get_dashboard))
}
