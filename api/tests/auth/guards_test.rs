#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, get_json_body, make_test_app, send};
    use api::auth::Claims;
    use axum::http::StatusCode;
    use chrono::Utc;
    use db::models::user::{Model as UserModel, Role};
    use jsonwebtoken::{EncodingKey, Header, encode};
    use util::config;

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let (app, _state) = make_test_app().await;

        let response = send(&app, "GET", "/api/tickets", None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Authentication required");
    }

    #[tokio::test]
    async fn token_signed_with_another_secret_is_rejected() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "mallory", Role::User).await;

        let claims = Claims {
            sub: user.model.id,
            exp: (Utc::now().timestamp() + 3600) as usize,
        };
        let forged = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"not-the-server-secret"),
        )
        .unwrap();

        let response = send(&app, "GET", "/api/auth/me", Some(&forged), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "late", Role::User).await;

        let claims = Claims {
            sub: user.model.id,
            exp: (Utc::now().timestamp() - 3600) as usize,
        };
        let expired = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config::jwt_secret().as_bytes()),
        )
        .unwrap();

        let response = send(&app, "GET", "/api/auth/me", Some(&expired), None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn role_is_read_from_the_database_not_the_token() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "riley", Role::User).await;

        let before = send(&app, "GET", "/api/tickets/assignees", Some(&user.token), None).await;
        assert_eq!(before.status(), StatusCode::FORBIDDEN);

        UserModel::set_role(state.db(), user.model.id, Role::Agent)
            .await
            .unwrap();

        let after = send(&app, "GET", "/api/tickets/assignees", Some(&user.token), None).await;
        assert_eq!(after.status(), StatusCode::OK);

        let me = get_json_body(
            send(&app, "GET", "/api/auth/me", Some(&user.token), None).await,
        )
        .await;
        assert_eq!(me["data"]["role"], "agent");
        assert_eq!(me["data"]["role_label"], "Support Agent");
    }

    #[tokio::test]
    async fn admin_guard_blocks_agents() {
        let (app, state) = make_test_app().await;
        let agent = create_user(&state, "agent", Role::Agent).await;

        let response = send(&app, "GET", "/api/users", Some(&agent.token), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Admin access required");
    }
}
