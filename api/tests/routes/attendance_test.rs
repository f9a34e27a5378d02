#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        body_json, get, json_request, make_test_app, seed_event, seed_student, seed_tenant, send,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    fn qr_data(event_id: i64, secret: &str, college_id: i64) -> serde_json::Value {
        json!({
            "qr_data": json!({
                "event_id": event_id,
                "secret": secret,
                "college_id": college_id,
            })
            .to_string()
        })
    }

    #[tokio::test]
    async fn manual_mark_requires_registered_student() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Lakeside").await;
        let event = seed_event(state.db(), &tenant, "Demo Day", 10).await;
        let (student, student_token) = seed_student(state.db(), tenant.college.id, "manual").await;

        let mark = json!({ "event_id": event.id, "student_id": student.id });
        let unregistered = send(
            &app,
            json_request(
                "POST",
                "/api/attendance/manual",
                Some(&tenant.admin_token),
                &mark,
            ),
        )
        .await;
        assert_eq!(unregistered.status(), StatusCode::BAD_REQUEST);

        send(
            &app,
            json_request(
                "POST",
                "/api/registrations",
                Some(&student_token),
                &json!({ "event_id": event.id }),
            ),
        )
        .await;

        let marked = send(
            &app,
            json_request(
                "POST",
                "/api/attendance/manual",
                Some(&tenant.admin_token),
                &mark,
            ),
        )
        .await;
        assert_eq!(marked.status(), StatusCode::OK);

        // One-shot fact: a second manual mark conflicts.
        let again = send(
            &app,
            json_request(
                "POST",
                "/api/attendance/manual",
                Some(&tenant.admin_token),
                &mark,
            ),
        )
        .await;
        assert_eq!(again.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn manual_mark_is_admin_only() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Lakeside").await;
        let event = seed_event(state.db(), &tenant, "Demo Day", 10).await;
        let (student, student_token) = seed_student(state.db(), tenant.college.id, "sneak").await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/attendance/manual",
                Some(&student_token),
                &json!({ "event_id": event.id, "student_id": student.id }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn qr_checkin_rejects_every_single_field_mismatch_identically() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Lakeside").await;
        let event = seed_event(state.db(), &tenant, "Open Day", 10).await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "scanner").await;

        let cases = [
            qr_data(event.id, "0000000000000000", tenant.college.id),
            qr_data(event.id + 999, &event.qr_secret, tenant.college.id),
            qr_data(event.id, &event.qr_secret, tenant.college.id + 7),
        ];

        let mut messages = Vec::new();
        for case in &cases {
            let response = send(
                &app,
                json_request("POST", "/api/attendance/qr-checkin", Some(&token), case),
            )
            .await;
            assert_eq!(response.status(), StatusCode::FORBIDDEN);
            messages.push(body_json(response).await["message"].clone());
        }
        assert!(messages.windows(2).all(|w| w[0] == w[1]));

        // The exact proof passes.
        let ok = send(
            &app,
            json_request(
                "POST",
                "/api/attendance/qr-checkin",
                Some(&token),
                &qr_data(event.id, &event.qr_secret, tenant.college.id),
            ),
        )
        .await;
        assert_eq!(ok.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn qr_checkin_twice_conflicts_without_duplicate_rows() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Lakeside").await;
        let event = seed_event(state.db(), &tenant, "Open Day", 10).await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "twice").await;

        let payload = qr_data(event.id, &event.qr_secret, tenant.college.id);
        let first = send(
            &app,
            json_request("POST", "/api/attendance/qr-checkin", Some(&token), &payload),
        )
        .await;
        assert_eq!(first.status(), StatusCode::OK);

        let second = send(
            &app,
            json_request("POST", "/api/attendance/qr-checkin", Some(&token), &payload),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);

        let roster = send(
            &app,
            get(
                &format!("/api/attendance/event/{}", event.id),
                Some(&tenant.admin_token),
            ),
        )
        .await;
        let roster = body_json(roster).await;
        assert_eq!(roster["data"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn malformed_qr_data_is_a_bad_request() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Lakeside").await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "garbled").await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/attendance/qr-checkin",
                Some(&token),
                &json!({ "qr_data": "not json at all" }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn roster_carries_student_identity_and_mark_source() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Lakeside").await;
        let event = seed_event(state.db(), &tenant, "Open Day", 10).await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "rostered").await;

        send(
            &app,
            json_request(
                "POST",
                "/api/attendance/qr-checkin",
                Some(&token),
                &qr_data(event.id, &event.qr_secret, tenant.college.id),
            ),
        )
        .await;

        let roster = send(
            &app,
            get(
                &format!("/api/attendance/event/{}", event.id),
                Some(&tenant.admin_token),
            ),
        )
        .await;
        assert_eq!(roster.status(), StatusCode::OK);
        let roster = body_json(roster).await;
        let row = &roster["data"][0];
        assert_eq!(row["student_name"], "rostered Student");
        assert_eq!(row["marked_by"], serde_json::Value::Null);
    }
}
