pub mod app;

pub use app::{TestApp, TestUser, create_user, get_json_body, make_test_app, send};
