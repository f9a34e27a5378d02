#[cfg(test)]
mod tests {
    use crate::helpers::app::{body_json, json_request, make_test_app, seed_tenant, send};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn register_student_returns_201_with_id() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Northfield").await;

        let body = json!({
            "email": "new.student@example.com",
            "password": "strongpassword",
            "first_name": "Nora",
            "last_name": "Newton",
            "student_number": "S7654321",
            "college_id": tenant.college.id,
        });
        let response = send(
            &app,
            json_request("POST", "/api/auth/register/student", None, &body),
        )
        .await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(json["data"]["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn register_rejects_bad_email_and_short_password() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Northfield").await;

        let bad_email = json!({
            "email": "not-an-email",
            "password": "strongpassword",
            "first_name": "A",
            "last_name": "B",
            "student_number": "S1111111",
            "college_id": tenant.college.id,
        });
        let response = send(
            &app,
            json_request("POST", "/api/auth/register/student", None, &bad_email),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let short_password = json!({
            "email": "fine@example.com",
            "password": "short",
            "first_name": "A",
            "last_name": "B",
            "student_number": "S1111111",
            "college_id": tenant.college.id,
        });
        let response = send(
            &app,
            json_request("POST", "/api/auth/register/student", None, &short_password),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["success"], false);
        // field-level detail rides along in data
        assert_eq!(
            json["data"]["password"][0],
            "Password must be at least 8 characters"
        );
    }

    #[tokio::test]
    async fn register_duplicate_email_conflicts() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Northfield").await;

        let body = json!({
            "email": "dup@example.com",
            "password": "strongpassword",
            "first_name": "Dee",
            "last_name": "Dup",
            "student_number": "S2222222",
            "college_id": tenant.college.id,
        });
        let first = send(
            &app,
            json_request("POST", "/api/auth/register/student", None, &body),
        )
        .await;
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = send(
            &app,
            json_request("POST", "/api/auth/register/student", None, &body),
        )
        .await;
        assert_eq!(second.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn register_unknown_college_is_a_bad_request() {
        let (app, _state) = make_test_app().await;

        let body = json!({
            "email": "ghost@example.com",
            "password": "strongpassword",
            "first_name": "Gh",
            "last_name": "Ost",
            "college_id": 4242,
        });
        let response = send(
            &app,
            json_request("POST", "/api/auth/register/admin", None, &body),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn login_roundtrip_issues_token() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Northfield").await;

        let register = json!({
            "email": "login.me@example.com",
            "password": "strongpassword",
            "first_name": "Log",
            "last_name": "In",
            "student_number": "S3333333",
            "college_id": tenant.college.id,
        });
        send(
            &app,
            json_request("POST", "/api/auth/register/student", None, &register),
        )
        .await;

        let login = json!({ "email": "login.me@example.com", "password": "strongpassword" });
        let response = send(&app, json_request("POST", "/api/auth/login", None, &login)).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert!(!json["data"]["token"].as_str().unwrap().is_empty());
        assert_eq!(json["data"]["user"]["role"], "student");
        assert_eq!(json["data"]["user"]["email"], "login.me@example.com");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_email_answer_identically() {
        let (app, state) = make_test_app().await;
        let tenant = seed_tenant(state.db(), "Northfield").await;

        let register = json!({
            "email": "probe@example.com",
            "password": "strongpassword",
            "first_name": "Pro",
            "last_name": "Be",
            "student_number": "S4444444",
            "college_id": tenant.college.id,
        });
        send(
            &app,
            json_request("POST", "/api/auth/register/student", None, &register),
        )
        .await;

        let wrong_pw = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                None,
                &json!({ "email": "probe@example.com", "password": "wrong" }),
            ),
        )
        .await;
        let unknown = send(
            &app,
            json_request(
                "POST",
                "/api/auth/login",
                None,
                &json!({ "email": "nobody@example.com", "password": "strongpassword" }),
            ),
        )
        .await;

        assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
        let a = body_json(wrong_pw).await;
        let b = body_json(unknown).await;
        assert_eq!(a["message"], b["message"]);
    }
}
