#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        body_json, get, json_request, make_test_app, seed_event, seed_student, seed_tenant, send,
    };
    use axum::http::StatusCode;
    use serde_json::json;

    async fn register_and_attend(
        app: &axum::Router,
        tenant: &crate::helpers::app::Tenant,
        event: &db::models::event::Model,
        token: &str,
        student_id: i64,
        attend: bool,
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
        if attend {
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
        }
    }

    #[tokio::test]
    async fn popularity_counts_non_cancelled_registrations_per_event() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Summit").await;
        let busy = seed_event(state.db(), &tenant, "Busy Event", 10).await;
        let quiet = seed_event(state.db(), &tenant, "Quiet Event", 10).await;

        for tag in ["p1", "p2", "p3"] {
            let (_, token) = seed_student(state.db(), tenant.college.id, tag).await;
            send(
                &app,
                json_request(
                    "POST",
                    "/api/registrations",
                    Some(&token),
                    &json!({ "event_id": busy.id }),
                ),
            )
            .await;
        }

        let response = send(
            &app,
            get("/api/reports/event-popularity", Some(&tenant.admin_token)),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"][0]["event_id"], busy.id);
        assert_eq!(json["data"][0]["registration_count"], 3);
        let quiet_row = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["event_id"] == quiet.id)
            .unwrap();
        assert_eq!(quiet_row["registration_count"], 0);
    }

    #[tokio::test]
    async fn attendance_percentage_special_cases_zero_registrations() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Summit").await;
        let attended_event = seed_event(state.db(), &tenant, "Attended", 10).await;
        let empty_event = seed_event(state.db(), &tenant, "Deserted", 10).await;

        let (s1, t1) = seed_student(state.db(), tenant.college.id, "r1").await;
        let (_s2, t2) = seed_student(state.db(), tenant.college.id, "r2").await;
        register_and_attend(&app, &tenant, &attended_event, &t1, s1.id, true).await;
        send(
            &app,
            json_request(
                "POST",
                "/api/registrations",
                Some(&t2),
                &json!({ "event_id": attended_event.id }),
            ),
        )
        .await;

        let response = send(
            &app,
            get(
                "/api/reports/attendance-percentage",
                Some(&tenant.admin_token),
            ),
        )
        .await;
        let json = body_json(response).await;
        let rows = json["data"].as_array().unwrap();

        let attended_row = rows
            .iter()
            .find(|r| r["event_id"] == attended_event.id)
            .unwrap();
        assert_eq!(attended_row["registered"], 2);
        assert_eq!(attended_row["attended"], 1);
        assert_eq!(attended_row["percentage"], 50.0);

        let empty_row = rows
            .iter()
            .find(|r| r["event_id"] == empty_event.id)
            .unwrap();
        assert_eq!(empty_row["registered"], 0);
        assert_eq!(empty_row["percentage"], 0.0);
    }

    #[tokio::test]
    async fn leaderboard_ranks_by_attendance_and_respects_limit() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Summit").await;

        let events = [
            seed_event(state.db(), &tenant, "E1", 10).await,
            seed_event(state.db(), &tenant, "E2", 10).await,
            seed_event(state.db(), &tenant, "E3", 10).await,
        ];

        // top attends 3 events, mid 2, low 1
        let plan: [(&str, usize); 3] = [("top", 3), ("mid", 2), ("low", 1)];
        let mut ids = Vec::new();
        for (tag, count) in plan {
            let (student, token) = seed_student(state.db(), tenant.college.id, tag).await;
            for event in events.iter().take(count) {
                register_and_attend(&app, &tenant, event, &token, student.id, true).await;
            }
            ids.push(student.id);
        }

        let response = send(
            &app,
            get("/api/reports/leaderboard?limit=2", Some(&tenant.admin_token)),
        )
        .await;
        let json = body_json(response).await;
        let rows = json["data"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["student_id"], ids[0]);
        assert_eq!(rows[0]["attendance_count"], 3);
        assert_eq!(rows[1]["student_id"], ids[1]);
    }

    #[tokio::test]
    async fn participation_supports_category_filter() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Summit").await;

        // seed_event uses the "general" category
        let general = seed_event(state.db(), &tenant, "General Meetup", 10).await;
        let tech = db::models::event::Model::create(
            state.db(),
            tenant.college.id,
            tenant.admin.id,
            "Tech Talk",
            None,
            Some("tech"),
            chrono::Utc::now(),
            "Lab",
            10,
            db::models::event::Status::Active,
        )
        .await
        .unwrap();

        let (student, token) = seed_student(state.db(), tenant.college.id, "mixed").await;
        register_and_attend(&app, &tenant, &general, &token, student.id, true).await;
        register_and_attend(&app, &tenant, &tech, &token, student.id, true).await;

        let all = send(
            &app,
            get("/api/reports/student-participation", Some(&tenant.admin_token)),
        )
        .await;
        let all = body_json(all).await;
        assert_eq!(all["data"][0]["attendance_count"], 2);

        let tech_only = send(
            &app,
            get(
                "/api/reports/student-participation?category=tech",
                Some(&tenant.admin_token),
            ),
        )
        .await;
        let tech_only = body_json(tech_only).await;
        assert_eq!(tech_only["data"][0]["attendance_count"], 1);
    }

    #[tokio::test]
    async fn average_feedback_reports_per_event_means() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Summit").await;
        let event = seed_event(state.db(), &tenant, "Rated Event", 10).await;

        for (tag, rating) in [("f1", 5), ("f2", 2)] {
            let (student, token) = seed_student(state.db(), tenant.college.id, tag).await;
            register_and_attend(&app, &tenant, &event, &token, student.id, true).await;
            send(
                &app,
                json_request(
                    "POST",
                    "/api/feedback",
                    Some(&token),
                    &json!({ "event_id": event.id, "rating": rating }),
                ),
            )
            .await;
        }

        let response = send(
            &app,
            get("/api/reports/average-feedback", Some(&tenant.admin_token)),
        )
        .await;
        let json = body_json(response).await;
        let row = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["event_id"] == event.id)
            .unwrap();
        assert_eq!(row["feedback_count"], 2);
        assert_eq!(row["average_rating"], 3.5);
    }

    #[tokio::test]
    async fn reports_never_cross_tenants() {
        let (app, state) = make_test_app().await;
        let home = seed_tenant(state.db(), "Summit").await;
        let away = seed_tenant(state.db(), "Foothill").await;

        let away_event = seed_event(state.db(), &away, "Away Gala", 10).await;
        let (away_student, away_token) =
            seed_student(state.db(), away.college.id, "awaystu").await;
        register_and_attend(&app, &away, &away_event, &away_token, away_student.id, true).await;

        for uri in [
            "/api/reports/event-popularity",
            "/api/reports/student-participation",
            "/api/reports/leaderboard",
            "/api/reports/attendance-percentage",
            "/api/reports/average-feedback",
        ] {
            let response = send(&app, get(uri, Some(&home.admin_token))).await;
            assert_eq!(response.status(), StatusCode::OK);
            let json = body_json(response).await;
            assert_eq!(
                json["data"].as_array().unwrap().len(),
                0,
                "{uri} leaked foreign-tenant rows"
            );
        }
    }

    #[tokio::test]
    async fn reports_are_admin_only() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Summit").await;
        let (_, token) = seed_student(state.db(), tenant.college.id, "curious").await;

        let response = send(&app, get("/api/reports/leaderboard", Some(&token))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
