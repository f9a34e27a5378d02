#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        body_json, get, json_request, make_test_app, seed_event, seed_student, seed_tenant, send,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn notes_require_a_registration() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Oakhurst").await;
        let event = seed_event(state.db(), &tenant, "Guest Lecture", 10).await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "writer").await;

        let body = json!({ "event_id": event.id, "content": "bring laptop" });
        let early = send(&app, json_request("POST", "/api/notes", Some(&token), &body)).await;
        assert_eq!(early.status(), StatusCode::BAD_REQUEST);

        send(
            &app,
            json_request(
                "POST",
                "/api/registrations",
                Some(&token),
                &json!({ "event_id": event.id }),
            ),
        )
        .await;

        let created = send(&app, json_request("POST", "/api/notes", Some(&token), &body)).await;
        assert_eq!(created.status(), StatusCode::OK);
        let created = body_json(created).await;
        assert_eq!(created["message"], "Note created");

        let updated = send(
            &app,
            json_request(
                "POST",
                "/api/notes",
                Some(&token),
                &json!({ "event_id": event.id, "content": "front row" }),
            ),
        )
        .await;
        let updated = body_json(updated).await;
        assert_eq!(updated["message"], "Note updated");
    }

    #[tokio::test]
    async fn get_note_returns_latest_content_or_null() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Oakhurst").await;
        let event = seed_event(state.db(), &tenant, "Guest Lecture", 10).await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "reader").await;

        let uri = format!("/api/notes/event/{}", event.id);
        let empty = send(&app, get(&uri, Some(&token))).await;
        assert_eq!(empty.status(), StatusCode::OK);
        let empty = body_json(empty).await;
        assert_eq!(empty["data"], serde_json::Value::Null);

        send(
            &app,
            json_request(
                "POST",
                "/api/registrations",
                Some(&token),
                &json!({ "event_id": event.id }),
            ),
        )
        .await;
        send(
            &app,
            json_request(
                "POST",
                "/api/notes",
                Some(&token),
                &json!({ "event_id": event.id, "content": "remember questions" }),
            ),
        )
        .await;

        let filled = send(&app, get(&uri, Some(&token))).await;
        let filled = body_json(filled).await;
        assert_eq!(filled["data"]["content"], "remember questions");
    }

    #[tokio::test]
    async fn notes_are_student_only() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Oakhurst").await;
        let event = seed_event(state.db(), &tenant, "Guest Lecture", 10).await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/notes",
                Some(&tenant.admin_token),
                &json!({ "event_id": event.id, "content": "admin note" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
