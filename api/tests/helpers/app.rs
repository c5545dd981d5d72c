use api::{auth::generate_jwt, routes::routes};
use axum::{
    Router,
    body::Body,
    http::{Request, header::CONTENT_TYPE},
    response::Response,
};
use db::{
    models::user::{Model as UserModel, Role},
    test_utils::setup_test_db,
};
use serde_json::Value;
use std::convert::Infallible;
use tower::ServiceExt;
use tower::util::BoxCloneService;
use util::state::AppState;

pub type TestApp = BoxCloneService<Request<Body>, Response, Infallible>;

/// Router over a fresh, migrated in-memory database.
pub async fn make_test_app() -> (TestApp, AppState) {
    let db = setup_test_db().await;
    let app_state = AppState::new(db);

    let router = Router::new()
        .nest("/api", routes(app_state.clone()))
        .with_state(app_state.clone());

    (router.into_service().boxed_clone(), app_state)
}

pub struct TestUser {
    pub model: UserModel,
    pub token: String,
}

pub async fn create_user(app_state: &AppState, username: &str, role: Role) -> TestUser {
    let model = UserModel::create(
        app_state.db(),
        &format!("{username}@example.com"),
        username,
        "password123",
        role,
    )
    .await
    .expect("Failed to create test user");
    let (token, _) = generate_jwt(model.id).expect("Failed to sign token");
    TestUser { model, token }
}

/// Sends one request. `token` adds a bearer header; `body` is sent as JSON.
pub async fn send(
    app: &TestApp,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
