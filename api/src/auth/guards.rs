//! Access guards applied as route layers.
//!
//! Guards authenticate the bearer token, then load the caller's current role
//! from the database and insert both `AuthUser` and an [`Actor`] into request
//! extensions. Handlers read the `Actor` and hand it to the services, which
//! make every finer-grained decision.

use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::Model as UserModel;
use services::policy::{self, Actor};
use util::state::AppState;

#[derive(serde::Serialize, Default)]
pub struct Empty;

type GuardError = (StatusCode, Json<ApiResponse<Empty>>);

/// Authenticates the request and resolves its `Actor`.
///
/// A valid token whose user no longer exists is treated as unauthenticated.
async fn extract_and_insert_actor(
    app_state: &AppState,
    req: Request<Body>,
) -> Result<(Request<Body>, Actor), GuardError> {
    let (mut parts, body) = req.into_parts();
    let user = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let account = UserModel::get_by_id(app_state.db(), user.0.sub)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = user.0.sub, "failed to load caller");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("Internal server error")),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;

    let actor = Actor::from(&account);

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);
    req.extensions_mut().insert(actor);
    Ok((req, actor))
}

/// Basic guard to ensure the request is authenticated.
pub async fn allow_authenticated(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, _actor) = extract_and_insert_actor(&app_state, req).await?;
    Ok(next.run(req).await)
}

/// Admin-only guard.
pub async fn allow_admin(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, GuardError> {
    let (req, actor) = extract_and_insert_actor(&app_state, req).await?;

    if !policy::can_manage_user_roles(actor.role) {
        tracing::debug!(user_id = actor.user_id, role = %actor.role, "admin route denied");
        return Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error("Admin access required")),
        ));
    }

    Ok(next.run(req).await)
}
