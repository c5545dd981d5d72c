#[cfg(test)]
mod tests {
    use crate::helpers::{get_json_body, make_test_app, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn register_then_login_by_username() {
        let (app, _state) = make_test_app().await;

        let payload = json!({
            "email": "Dana@Example.com",
            "username": "dana",
            "password": "correct horse"
        });
        let response = send(&app, "POST", "/api/auth/register", None, Some(payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["user"]["email"], "dana@example.com");
        assert_eq!(json["data"]["user"]["role"], "user");
        assert!(json["data"]["user"].get("password_hash").is_none());
        assert!(json["data"]["token"].as_str().is_some());

        let login = json!({ "login": "dana", "password": "correct horse" });
        let response = send(&app, "POST", "/api/auth/login", None, Some(login)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        let token = json["data"]["token"].as_str().unwrap().to_owned();

        let me = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
        assert_eq!(me.status(), StatusCode::OK);
        let me = get_json_body(me).await;
        assert_eq!(me["data"]["username"], "dana");
    }

    #[tokio::test]
    async fn register_rejects_bad_input_and_duplicates() {
        let (app, _state) = make_test_app().await;

        let bad_email = json!({ "email": "nope", "username": "erin", "password": "password123" });
        let response = send(&app, "POST", "/api/auth/register", None, Some(bad_email)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Invalid email format");

        let short = json!({ "email": "erin@example.com", "username": "erin", "password": "short" });
        let response = send(&app, "POST", "/api/auth/register", None, Some(short)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let ok = json!({
            "email": "erin@example.com",
            "username": "erin",
            "password": "password123"
        });
        let response = send(&app, "POST", "/api/auth/register", None, Some(ok.clone())).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(&app, "POST", "/api/auth/register", None, Some(ok)).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "A user with this email already exists");
    }

    #[tokio::test]
    async fn login_with_wrong_password_is_unauthorized() {
        let (app, _state) = make_test_app().await;

        let payload = json!({
            "email": "f@example.com",
            "username": "fay",
            "password": "password123"
        });
        send(&app, "POST", "/api/auth/register", None, Some(payload)).await;

        let login = json!({ "email": "f@example.com", "password": "wrong-password" });
        let response = send(&app, "POST", "/api/auth/login", None, Some(login)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Invalid credentials");
    }
}
