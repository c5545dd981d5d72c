#[cfg(test)]
mod tests {
    use crate::helpers::{create_user, get_json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::user::Role;
    use serde_json::json;

    #[tokio::test]
    async fn internal_comment_hidden_from_ticket_creator() {
        let (app, state) = make_test_app().await;
        let u1 = create_user(&state, "u1", Role::User).await;
        let a1 = create_user(&state, "a1", Role::Agent).await;
        let admin = create_user(&state, "root", Role::Admin).await;

        let created = send(
            &app,
            "POST",
            "/api/tickets",
            Some(&u1.token),
            Some(json!({ "title": "Mail", "description": "bounces" })),
        )
        .await;
        let ticket = get_json_body(created).await["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/tickets/{ticket}/comments");

        let response = send(
            &app,
            "POST",
            &uri,
            Some(&u1.token),
            Some(json!({ "content": "any news?" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(
            &app,
            "POST",
            &uri,
            Some(&a1.token),
            Some(json!({ "content": "MX record looks wrong", "is_internal": true })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["author"]["username"], "a1");

        let json = get_json_body(send(&app, "GET", &uri, Some(&u1.token), None).await).await;
        let thread = json["data"].as_array().unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(thread[0]["content"], "any news?");

        for staff in [&a1, &admin] {
            let json = get_json_body(send(&app, "GET", &uri, Some(&staff.token), None).await).await;
            let thread = json["data"].as_array().unwrap();
            assert_eq!(thread.len(), 2);
            assert_eq!(thread[1]["is_internal"], true);
        }
    }

    #[tokio::test]
    async fn user_cannot_post_internal_notes() {
        let (app, state) = make_test_app().await;
        let u1 = create_user(&state, "u1", Role::User).await;
        let u2 = create_user(&state, "u2", Role::User).await;

        let created = send(
            &app,
            "POST",
            "/api/tickets",
            Some(&u1.token),
            Some(json!({ "title": "t", "description": "d" })),
        )
        .await;
        let ticket = get_json_body(created).await["data"]["id"].as_i64().unwrap();
        let uri = format!("/api/tickets/{ticket}/comments");

        let response = send(
            &app,
            "POST",
            &uri,
            Some(&u1.token),
            Some(json!({ "content": "secret", "is_internal": true })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(
            &app,
            "POST",
            &uri,
            Some(&u2.token),
            Some(json!({ "content": "hi" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(
            &app,
            "POST",
            &uri,
            Some(&u1.token),
            Some(json!({ "content": "" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
