#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        body_json, get, json_request, make_test_app, seed_event, seed_student, seed_tenant, send,
    };
    use axum::http::StatusCode;
    use db::models::attendance;
    use serde_json::json;

    /// Registers and checks the student in so feedback preconditions hold.
    async fn attend(
        app: &axum::Router,
        state: &util::state::AppState,
        tenant: &crate::helpers::app::Tenant,
        event: &db::models::event::Model,
        token: &str,
        student_id: i64,
    ) {
        send(
            app,
            json_request(
                "POST",
                "/api/registrations",
                Some(token),
                &json!({ "event_id": event.id }),
            ),
        )
        .await;
        send(
            app,
            json_request(
                "POST",
                "/api/attendance/manual",
                Some(&tenant.admin_token),
                &json!({ "event_id": event.id, "student_id": student_id }),
            ),
        )
        .await;
        assert!(
            attendance::Model::exists(state.db(), event.id, student_id)
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn feedback_requires_attendance() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Pinecrest").await;
        let event = seed_event(state.db(), &tenant, "Film Night", 10).await;
        let (student, token) = seed_student(state.db(), tenant.college.id, "critic").await;

        let body = json!({ "event_id": event.id, "rating": 4 });
        let early = send(&app, json_request("POST", "/api/feedback", Some(&token), &body)).await;
        assert_eq!(early.status(), StatusCode::BAD_REQUEST);

        attend(&app, &state, &tenant, &event, &token, student.id).await;

        let ok = send(&app, json_request("POST", "/api/feedback", Some(&token), &body)).await;
        assert_eq!(ok.status(), StatusCode::CREATED);

        let dup = send(&app, json_request("POST", "/api/feedback", Some(&token), &body)).await;
        assert_eq!(dup.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn rating_outside_one_to_five_is_rejected() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Pinecrest").await;
        let event = seed_event(state.db(), &tenant, "Film Night", 10).await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "harsh").await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/api/feedback",
                Some(&token),
                &json!({ "event_id": event.id, "rating": 6 }),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_updates_only_sent_fields_for_the_owner() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Pinecrest").await;
        let event = seed_event(state.db(), &tenant, "Film Night", 10).await;
        let (student, token) = seed_student(state.db(), tenant.college.id, "editor").await;
        attend(&app, &state, &tenant, &event, &token, student.id).await;

        let created = send(
            &app,
            json_request(
                "POST",
                "/api/feedback",
                Some(&token),
                &json!({ "event_id": event.id, "rating": 3, "comments": "fine" }),
            ),
        )
        .await;
        let created = body_json(created).await;
        let feedback_id = created["data"]["feedback_id"].as_i64().unwrap();

        let empty = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/feedback/{feedback_id}"),
                Some(&token),
                &json!({}),
            ),
        )
        .await;
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

        let patch = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/feedback/{feedback_id}"),
                Some(&token),
                &json!({ "rating": 5 }),
            ),
        )
        .await;
        assert_eq!(patch.status(), StatusCode::OK);

        // Another student cannot touch it.
        let (_, other_token) = seed_student(state.db(), tenant.college.id, "intruder").await;
        let foreign = send(
            &app,
            json_request(
                "PUT",
                &format!("/api/feedback/{feedback_id}"),
                Some(&other_token),
                &json!({ "rating": 1 }),
            ),
        )
        .await;
        assert_eq!(foreign.status(), StatusCode::NOT_FOUND);

        let listing = send(
            &app,
            get(
                &format!("/api/feedback/event/{}", event.id),
                Some(&tenant.admin_token),
            ),
        )
        .await;
        let listing = body_json(listing).await;
        assert_eq!(listing["data"]["feedback"][0]["rating"], 5);
        assert_eq!(listing["data"]["feedback"][0]["comments"], "fine");
    }

    #[tokio::test]
    async fn summary_reports_average_and_distribution_and_hides_anonymous_ids() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Pinecrest").await;
        let event = seed_event(state.db(), &tenant, "Film Night", 10).await;

        let ratings = [(5, false), (4, true), (3, false)];
        for (i, (rating, anonymous)) in ratings.iter().enumerate() {
            let (student, token) =
                seed_student(state.db(), tenant.college.id, &format!("viewer{i}")).await;
            attend(&app, &state, &tenant, &event, &token, student.id).await;
            send(
                &app,
                json_request(
                    "POST",
                    "/api/feedback",
                    Some(&token),
                    &json!({ "event_id": event.id, "rating": rating, "anonymous": anonymous }),
                ),
            )
            .await;
        }

        let listing = send(
            &app,
            get(
                &format!("/api/feedback/event/{}", event.id),
                Some(&tenant.admin_token),
            ),
        )
        .await;
        assert_eq!(listing.status(), StatusCode::OK);
        let listing = body_json(listing).await;

        assert_eq!(listing["data"]["summary"]["average_rating"], 4.0);
        assert_eq!(
            listing["data"]["summary"]["distribution"],
            json!([0, 0, 1, 1, 1])
        );

        let anonymous_rows: Vec<_> = listing["data"]["feedback"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|row| row["anonymous"] == true)
            .collect();
        assert_eq!(anonymous_rows.len(), 1);
        assert_eq!(anonymous_rows[0]["student_id"], serde_json::Value::Null);
    }
}
