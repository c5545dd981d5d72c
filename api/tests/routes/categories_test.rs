#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, get_json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn only_admins_create_categories() {
        let (app, state) = make_test_app().await;
        let agent = create_user(&state, "a1", Role::Agent).await;
        let admin = create_user(&state, "root", Role::Admin).await;

        let payload = json!({ "name": "Network" });
        let response = send(
            &app,
            "POST",
            "/api/categories",
            Some(&agent.token),
            Some(payload.clone()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(
            &app,
            "POST",
            "/api/categories",
            Some(&admin.token),
            Some(payload.clone()),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["color"], "#6b7280");

        let response = send(
            &app,
            "POST",
            "/api/categories",
            Some(&admin.token),
            Some(payload),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = send(
            &app,
            "POST",
            "/api/categories",
            Some(&admin.token),
            Some(json!({ "name": "Mail", "color": "blue" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = get_json_body(
            send(&app, "GET", "/api/categories", Some(&agent.token), None).await,
        )
        .await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn deleting_category_keeps_its_tickets_visible() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let admin = create_user(&state, "root", Role::Admin).await;

        let category = get_json_body(
            send(
                &app,
                "POST",
                "/api/categories",
                Some(&admin.token),
                Some(json!({ "name": "Hardware", "color": "#ff0000" })),
            )
            .await,
        )
        .await["data"]["id"]
            .as_i64()
            .unwrap();

        let ticket = get_json_body(
            send(
                &app,
                "POST",
                "/api/tickets",
                Some(&user.token),
                Some(json!({ "title": "Mouse", "description": "broken", "category_id": category })),
            )
            .await,
        )
        .await["data"]["id"]
            .as_i64()
            .unwrap();

        let response = send(
            &app,
            "DELETE",
            &format!("/api/categories/{category}"),
            Some(&admin.token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["detached_tickets"], 1);

        let response = send(
            &app,
            "GET",
            &format!("/api/tickets/{ticket}"),
            Some(&user.token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert!(json["data"]["category_id"].is_null());
        assert_eq!(json["data"]["title"], "Mouse");

        let response = send(
            &app,
            "DELETE",
            &format!("/api/categories/{category}"),
            Some(&admin.token),
            None,
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_category_keeps_color_when_omitted() {
        let (app, state) = make_test_app().await;
        let admin = create_user(&state, "root", Role::Admin).await;

        let id = get_json_body(
            send(
                &app,
                "POST",
                "/api/categories",
                Some(&admin.token),
                Some(json!({ "name": "Software", "color": "#00ff00" })),
            )
            .await,
        )
        .await["data"]["id"]
            .as_i64()
            .unwrap();

        let response = send(
            &app,
            "PUT",
            &format!("/api/categories/{id}"),
            Some(&admin.token),
            Some(json!({ "name": "Apps" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["name"], "Apps");
        assert_eq!(json["data"]["color"], "#00ff00");
    }
}
