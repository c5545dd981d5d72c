#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, get_json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn profile_update_never_touches_role() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;

        let response = send(
            &app,
            "PUT",
            "/api/me/profile",
            Some(&user.token),
            Some(json!({ "full_name": "Uma One", "role": "admin" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["display_name"], "Uma One");
        assert_eq!(json["data"]["role"], "user");

        let response = send(
            &app,
            "PUT",
            "/api/me/profile",
            Some(&user.token),
            Some(json!({ "avatar_url": "ftp://nope" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn username_conflict_on_profile_update() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        create_user(&state, "taken", Role::User).await;

        let response = send(
            &app,
            "PUT",
            "/api/me/profile",
            Some(&user.token),
            Some(json!({ "username": "taken" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn profile_username_follows_registration_rules() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let other = create_user(&state, "u2", Role::User).await;

        for username in ["u2@example.com", "has space", "ab"] {
            let response = send(
                &app,
                "PUT",
                "/api/me/profile",
                Some(&user.token),
                Some(json!({ "username": username })),
            )
            .await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{username}");
        }

        let response = send(
            &app,
            "PUT",
            "/api/me/profile",
            Some(&user.token),
            Some(json!({ "username": "uma.one" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let login = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "login": other.model.email, "password": "password123" })),
        )
        .await;
        let json = get_json_body(login).await;
        assert_eq!(json["data"]["user"]["id"], other.model.id);
    }

    #[tokio::test]
    async fn dashboard_fields_depend_on_role() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let agent = create_user(&state, "a1", Role::Agent).await;
        let admin = create_user(&state, "root", Role::Admin).await;

        send(
            &app,
            "POST",
            "/api/tickets",
            Some(&user.token),
            Some(json!({ "title": "t", "description": "d" })),
        )
        .await;

        let json = get_json_body(
            send(&app, "GET", "/api/me/dashboard", Some(&user.token), None).await,
        )
        .await;
        assert_eq!(json["data"]["total"], 1);
        assert_eq!(json["data"]["open"], 1);
        assert!(json["data"].get("assigned_to_me").is_none());

        let json = get_json_body(
            send(&app, "GET", "/api/me/dashboard", Some(&agent.token), None).await,
        )
        .await;
        assert_eq!(json["data"]["assigned_to_me"], 0);
        assert!(json["data"].get("total_users").is_none());

        let json = get_json_body(
            send(&app, "GET", "/api/me/dashboard", Some(&admin.token), None).await,
        )
        .await;
        assert_eq!(json["data"]["total_users"], 3);
        assert_eq!(json["data"]["total_categories"], 0);
    }
}
