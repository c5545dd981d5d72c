#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, get_json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn admin_lists_users_newest_first() {
        let (app, state) = make_test_app().await;
        let admin = create_user(&state, "root", Role::Admin).await;
        let user = create_user(&state, "u1", Role::User).await;

        let response = send(&app, "GET", "/api/users", Some(&user.token), None).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&app, "GET", "/api/users", Some(&admin.token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        let users = json["data"].as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["id"], user.model.id);
    }

    #[tokio::test]
    async fn admin_promotes_user_but_not_self() {
        let (app, state) = make_test_app().await;
        let admin = create_user(&state, "root", Role::Admin).await;
        let user = create_user(&state, "u1", Role::User).await;

        let response = send(
            &app,
            "PUT",
            &format!("/api/users/{}/role", user.model.id),
            Some(&admin.token),
            Some(json!({ "role": "agent" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["role"], "agent");
        assert_eq!(json["data"]["role_badge"], "default");

        let response = send(
            &app,
            "PUT",
            &format!("/api/users/{}/role", admin.model.id),
            Some(&admin.token),
            Some(json!({ "role": "user" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            "PUT",
            &format!("/api/users/{}/role", user.model.id),
            Some(&admin.token),
            Some(json!({ "role": "owner" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = send(
            &app,
            "PUT",
            "/api/users/9999/role",
            Some(&admin.token),
            Some(json!({ "role": "agent" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
