#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        body_json, get, json_request, make_test_app, seed_event, seed_student, seed_tenant, send,
    };
    use axum::http::StatusCode;
    use db::models::user;
    use serde_json::json;

    #[tokio::test]
    async fn create_event_as_admin_accepts_max_participants_alias() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Eastgate").await;

        let body = json!({
            "title": "Orientation",
            "event_date": "2026-09-01T18:00:00Z",
            "venue": "Main Hall",
            "max_participants": 150,
            "category": "social",
        });
        let response = send(
            &app,
            json_request("POST", "/api/events", Some(&tenant.admin_token), &body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let event_id = json["data"]["event_id"].as_i64().unwrap();

        let detail = send(
            &app,
            get(&format!("/api/events/{event_id}"), Some(&tenant.admin_token)),
        )
        .await;
        let detail = body_json(detail).await;
        assert_eq!(detail["data"]["event"]["capacity"], 150);
    }

    #[tokio::test]
    async fn create_event_requires_admin_role() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Eastgate").await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "plain").await;

        let body = json!({
            "title": "Rogue Event",
            "event_date": "2026-09-01T18:00:00Z",
            "venue": "Basement",
            "capacity": 5,
        });
        let response = send(&app, json_request("POST", "/api/events", Some(&token), &body)).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn listing_is_tenant_scoped_with_pagination() {
        let (app, state) = make_test_app().await;
        let home = seed_tenant(state.db(), "Eastgate").await;
        let away = seed_tenant(state.db(), "Westbrook").await;

        for i in 0..3 {
            seed_event(state.db(), &home, &format!("Home {i}"), 10).await;
        }
        seed_event(state.db(), &away, "Away Event", 10).await;

        let response = send(
            &app,
            get("/api/events?limit=2&offset=0", Some(&home.admin_token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["events"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["pagination"]["total"], 3);

        let titles: Vec<String> = json["data"]["events"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["title"].as_str().unwrap().to_string())
            .collect();
        assert!(titles.iter().all(|t| t.starts_with("Home")));
    }

    #[tokio::test]
    async fn student_detail_carries_their_registration() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Eastgate").await;
        let event = seed_event(state.db(), &tenant, "Hack Night", 1).await;
        let (_, first) = seed_student(state.db(), tenant.college.id, "one").await;
        let (_, second) = seed_student(state.db(), tenant.college.id, "two").await;

        for token in [&first, &second] {
            send(
                &app,
                json_request(
                    "POST",
                    "/api/registrations",
                    Some(token),
                    &json!({ "event_id": event.id }),
                ),
            )
            .await;
        }

        let detail = send(
            &app,
            get(&format!("/api/events/{}", event.id), Some(&second)),
        )
        .await;
        let detail = body_json(detail).await;
        assert_eq!(detail["data"]["registered_count"], 1);
        assert_eq!(detail["data"]["user_registration"]["status"], "waitlisted");
        assert_eq!(detail["data"]["user_registration"]["waitlist_position"], 1);
    }

    #[tokio::test]
    async fn illegal_status_transition_is_rejected() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Eastgate").await;
        let event = seed_event(state.db(), &tenant, "Completed Event", 10).await;

        let complete = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/events/{}", event.id),
                Some(&tenant.admin_token),
                &json!({ "status": "completed" }),
            ),
        )
        .await;
        assert_eq!(complete.status(), StatusCode::OK);

        let resurrect = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/events/{}", event.id),
                Some(&tenant.admin_token),
                &json!({ "status": "active" }),
            ),
        )
        .await;
        assert_eq!(resurrect.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn only_the_owner_may_edit_or_read_qr() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Eastgate").await;
        let event = seed_event(state.db(), &tenant, "Owned Event", 10).await;

        let other_admin = user::Model::create(
            state.db(),
            tenant.college.id,
            "second.admin@eastgate.edu",
            "password123",
            "Second",
            "Admin",
            None,
            user::Role::Admin,
        )
        .await
        .unwrap();
        let (other_token, _) = api::auth::generate_jwt(&other_admin);

        let edit = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/events/{}", event.id),
                Some(&other_token),
                &json!({ "title": "Hijacked" }),
            ),
        )
        .await;
        assert_eq!(edit.status(), StatusCode::FORBIDDEN);

        let qr = send(
            &app,
            get(&format!("/api/events/{}/qr", event.id), Some(&other_token)),
        )
        .await;
        assert_eq!(qr.status(), StatusCode::FORBIDDEN);

        let qr = send(
            &app,
            get(
                &format!("/api/events/{}/qr", event.id),
                Some(&tenant.admin_token),
            ),
        )
        .await;
        assert_eq!(qr.status(), StatusCode::OK);
        let qr = body_json(qr).await;
        assert_eq!(qr["data"]["event_id"], event.id);
        assert_eq!(qr["data"]["secret"].as_str().unwrap().len(), 64);
    }

    #[tokio::test]
    async fn delete_cascades_and_404s_after() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Eastgate").await;
        let event = seed_event(state.db(), &tenant, "Short Lived", 10).await;

        let delete = send(
            &app,
            json_request(
                "DELETE",
                &format!("/api/events/{}", event.id),
                Some(&tenant.admin_token),
                &json!({}),
            ),
        )
        .await;
        assert_eq!(delete.status(), StatusCode::OK);

        let detail = send(
            &app,
            get(&format!("/api/events/{}", event.id), Some(&tenant.admin_token)),
        )
        .await;
        assert_eq!(detail.status(), StatusCode::NOT_FOUND);
    }
}
