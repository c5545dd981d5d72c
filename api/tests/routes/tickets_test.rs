#[cfg(test)]
mod tests {
    use crate::helpers::{TestApp, TestUser, create_user, get_json_body, make_test_app, send};
    use axum::http::StatusCode;
    use db::models::{category::Model as CategoryModel, user::Role};
    use serde_json::{Value, json};

    async fn open_ticket(app: &TestApp, user: &TestUser, title: &str) -> i64 {
        let payload = json!({ "title": title, "description": "details", "priority": "high" });
        let response = send(app, "POST", "/api/tickets", Some(&user.token), Some(payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        get_json_body(response).await["data"]["id"].as_i64().unwrap()
    }

    async fn fetch(app: &TestApp, user: &TestUser, uri: &str) -> Value {
        get_json_body(send(app, "GET", uri, Some(&user.token), None).await).await
    }

    async fn get_status(app: &TestApp, user: &TestUser, uri: &str) -> StatusCode {
        send(app, "GET", uri, Some(&user.token), None).await.status()
    }

    fn ids(json: &Value) -> Vec<i64> {
        json["data"]["tickets"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn create_ticket_defaults() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;

        let payload = json!({ "title": "Printer", "description": "jammed" });
        let response = send(&app, "POST", "/api/tickets", Some(&user.token), Some(payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["status"], "open");
        assert_eq!(json["data"]["priority"], "medium");
        assert_eq!(json["data"]["created_by"], user.model.id);
        assert!(json["data"]["assigned_to"].is_null());
    }

    #[tokio::test]
    async fn create_ticket_rejects_blank_title() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;

        let payload = json!({ "title": "", "description": "jammed" });
        let response = send(&app, "POST", "/api/tickets", Some(&user.token), Some(payload)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn tickets_carry_creator_assignee_and_category() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let agent = create_user(&state, "a1", Role::Agent).await;
        let category = CategoryModel::create(state.db(), "Network", None, Some("#2563eb"))
            .await
            .unwrap();

        let payload = json!({
            "title": "VPN down",
            "description": "since noon",
            "category_id": category.id
        });
        let response = send(&app, "POST", "/api/tickets", Some(&user.token), Some(payload)).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created = get_json_body(response).await;
        assert_eq!(created["data"]["creator"]["id"], user.model.id);
        assert_eq!(created["data"]["creator"]["display_name"], "u1");
        assert!(created["data"]["assignee"].is_null());
        assert_eq!(created["data"]["category"]["name"], "Network");
        assert_eq!(created["data"]["category"]["color"], "#2563eb");
        let ticket = created["data"]["id"].as_i64().unwrap();

        let response = send(
            &app,
            "PUT",
            &format!("/api/tickets/{ticket}/assignee"),
            Some(&agent.token),
            Some(json!({ "assignee_id": agent.model.id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let assigned = get_json_body(response).await;
        assert_eq!(assigned["data"]["assignee"]["username"], "a1");
        assert_eq!(assigned["data"]["assignee"]["role"], "agent");

        let detail = fetch(&app, &user, &format!("/api/tickets/{ticket}")).await;
        assert_eq!(detail["data"]["creator"]["username"], "u1");
        assert_eq!(detail["data"]["assignee"]["id"], agent.model.id);
        assert_eq!(detail["data"]["category"]["id"], category.id);

        let listed = fetch(&app, &agent, "/api/tickets").await;
        let first = &listed["data"]["tickets"][0];
        assert_eq!(first["creator"]["username"], "u1");
        assert_eq!(first["assignee"]["username"], "a1");
        assert_eq!(first["category"]["name"], "Network");
    }

    #[tokio::test]
    async fn users_see_only_their_own_tickets() {
        let (app, state) = make_test_app().await;
        let u1 = create_user(&state, "u1", Role::User).await;
        let u2 = create_user(&state, "u2", Role::User).await;
        let agent = create_user(&state, "a1", Role::Agent).await;

        let t1 = open_ticket(&app, &u1, "mine").await;
        let t2 = open_ticket(&app, &u2, "theirs").await;

        let json = fetch(&app, &u1, "/api/tickets").await;
        assert_eq!(ids(&json), vec![t1]);
        assert_eq!(json["data"]["total"], 1);

        let json = fetch(&app, &agent, "/api/tickets").await;
        assert_eq!(ids(&json), vec![t2, t1]);

        let status = get_status(&app, &u1, &format!("/api/tickets/{t2}")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let status = get_status(&app, &u1, "/api/tickets/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn list_filters_and_validates_query() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let agent = create_user(&state, "a1", Role::Agent).await;

        let vpn = open_ticket(&app, &user, "VPN down").await;
        open_ticket(&app, &user, "Laptop").await;

        let json = fetch(&app, &agent, "/api/tickets?query=vpn").await;
        assert_eq!(ids(&json), vec![vpn]);

        let json = fetch(&app, &agent, "/api/tickets?query=_").await;
        assert_eq!(json["data"]["total"], 0);

        for bad in [
            "/api/tickets?status=pending",
            "/api/tickets?sort=-title",
            "/api/tickets?per_page=500",
        ] {
            assert_eq!(get_status(&app, &agent, bad).await, StatusCode::BAD_REQUEST, "{bad}");
        }

        let json = fetch(&app, &agent, "/api/tickets?page=2&per_page=1").await;
        assert_eq!(json["data"]["total"], 2);
        assert_eq!(json["data"]["page"], 2);
        assert_eq!(ids(&json).len(), 1);
    }

    #[tokio::test]
    async fn user_cannot_change_status_of_own_ticket() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let ticket = open_ticket(&app, &user, "mine").await;

        let response = send(
            &app,
            "PUT",
            &format!("/api/tickets/{ticket}/status"),
            Some(&user.token),
            Some(json!({ "status": "closed" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let detail = fetch(&app, &user, &format!("/api/tickets/{ticket}")).await;
        assert_eq!(detail["data"]["permissions"]["can_manage"], false);
        assert_eq!(detail["data"]["permissions"]["allowed_statuses"], json!([]));
    }

    #[tokio::test]
    async fn claim_race_between_two_agents() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let a1 = create_user(&state, "a1", Role::Agent).await;
        let a2 = create_user(&state, "a2", Role::Agent).await;
        let admin = create_user(&state, "root", Role::Admin).await;
        let ticket = open_ticket(&app, &user, "race").await;
        let assignee_uri = format!("/api/tickets/{ticket}/assignee");
        let status_uri = format!("/api/tickets/{ticket}/status");

        let response = send(
            &app,
            "PUT",
            &assignee_uri,
            Some(&a1.token),
            Some(json!({ "assignee_id": a1.model.id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["assigned_to"], a1.model.id);

        let response = send(
            &app,
            "PUT",
            &assignee_uri,
            Some(&a2.token),
            Some(json!({ "assignee_id": a2.model.id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(
            &app,
            "PUT",
            &status_uri,
            Some(&a2.token),
            Some(json!({ "status": "resolved" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(
            &app,
            "PUT",
            &status_uri,
            Some(&a1.token),
            Some(json!({ "status": "in_progress" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            &app,
            "PUT",
            &status_uri,
            Some(&admin.token),
            Some(json!({ "status": "resolved" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["status"], "resolved");
        assert_eq!(json["data"]["status_label"], "resolved");
    }

    #[tokio::test]
    async fn same_status_is_a_bad_request() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let agent = create_user(&state, "a1", Role::Agent).await;
        let ticket = open_ticket(&app, &user, "t").await;

        let response = send(
            &app,
            "PUT",
            &format!("/api/tickets/{ticket}/status"),
            Some(&agent.token),
            Some(json!({ "status": "open" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn plain_users_cannot_be_assigned() {
        let (app, state) = make_test_app().await;
        let user = create_user(&state, "u1", Role::User).await;
        let admin = create_user(&state, "root", Role::Admin).await;
        let agent = create_user(&state, "a1", Role::Agent).await;
        let ticket = open_ticket(&app, &user, "t").await;

        let response = send(
            &app,
            "PUT",
            &format!("/api/tickets/{ticket}/assignee"),
            Some(&admin.token),
            Some(json!({ "assignee_id": user.model.id })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = fetch(&app, &admin, "/api/tickets/assignees").await;
        let roles: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|u| u["role"].as_str().unwrap())
            .collect();
        assert_eq!(roles.len(), 2);
        assert!(!roles.contains(&"user"));
        let assignees = json["data"].as_array().unwrap();
        assert!(assignees.iter().any(|u| u["id"] == agent.model.id));
    }
}
