//! Category routes module.
//!
//! Any authenticated user can list categories; changes are admin-only and
//! enforced by the category service.

use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use delete::delete_category;
use get::get_categories;
use post::create_category;
use put::edit_category;

/// - `GET    /categories`                → List categories
/// - `POST   /categories`                → Create a category
/// - `PUT    /categories/{category_id}`  → Edit a category
/// - `DELETE /categories/{category_id}`  → Delete a category, detaching its tickets
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get_categories).post(create_category))
        .route(
            "/{category_id}",
            put(edit_category).delete(delete_category),
        )
}
