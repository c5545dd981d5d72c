//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check (public)
//! - `/auth` → Register and login (public), current user (authenticated)
//! - `/tickets` → Tickets, assignment and comments (authenticated)
//! - `/categories` → Category listing and administration (authenticated)
//! - `/users` → User administration (admin-only)
//! - `/me` → The caller's profile and dashboard (authenticated)

use crate::auth::guards::{allow_admin, allow_authenticated};
use crate::routes::{
    auth::auth_routes, categories::category_routes, health::health_routes, me::me_routes,
    tickets::ticket_routes, users::users_routes,
};
use axum::{Router, middleware::from_fn_with_state};
use util::state::AppState;

pub mod auth;
pub mod categories;
pub mod common;
pub mod health;
pub mod me;
pub mod tickets;
pub mod users;

/// Builds the complete application router for all HTTP endpoints.
///
/// Authenticated groups run behind a guard that resolves the caller's
/// current role from the database on every request.
pub fn routes(app_state: AppState) -> Router<AppState> {
    let authenticated = || from_fn_with_state(app_state.clone(), allow_authenticated);

    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes(app_state.clone()))
        .nest("/tickets", ticket_routes().route_layer(authenticated()))
        .nest("/categories", category_routes().route_layer(authenticated()))
        .nest(
            "/users",
            users_routes().route_layer(from_fn_with_state(app_state.clone(), allow_admin)),
        )
        .nest("/me", me_routes().route_layer(authenticated()))
}
