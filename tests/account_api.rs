//! Registration, login, current user and lesson progress over HTTP.

mod common;

use common::{TestApp, PASSWORD};
use http::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn register_returns_token_and_public_view() {
    let app = TestApp::new();

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Ada", "email": "Ada@Example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["token"].as_str().unwrap().len() > 20);
    assert_eq!(body["user"]["email"], "ada@example.com");
    assert_eq!(body["user"]["isAdmin"], false);
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn second_registration_with_same_email_conflicts() {
    let app = TestApp::new();
    app.register("Ada").await;

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Imposter", "email": "ADA@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "EMAIL_TAKEN");

    let root = app.admin("Root").await;
    let (_, users) = app.get("/api/admin/users", Some(&root.token)).await;
    let adas = users
        .as_array()
        .unwrap()
        .iter()
        .filter(|u| u["email"] == "ada@example.com")
        .count();
    assert_eq!(adas, 1);
}

#[tokio::test]
async fn short_password_and_blank_name_are_rejected() {
    let app = TestApp::new();

    let (status, _) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "Ada", "email": "ada@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/auth/register",
            None,
            json!({ "name": "", "email": "ada@example.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().starts_with("name"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let app = TestApp::new();
    let (status, body) = app
        .post("/api/auth/login", None, json!({ "email": "ada@example.com" }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn login_token_identifies_the_same_user() {
    let app = TestApp::new();
    let ada = app.register("Ada").await;

    let (status, body) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();

    let (status, me) = app.get("/api/auth/me", Some(token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["id"], ada.id.as_str());
}

#[tokio::test]
async fn unknown_email_and_wrong_password_look_the_same() {
    let app = TestApp::new();
    app.register("Ada").await;

    let (wrong_status, wrong) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "ada@example.com", "password": "not-the-password" }),
        )
        .await;
    let (unknown_status, unknown) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": PASSWORD }),
        )
        .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, unknown);
}

#[tokio::test]
async fn me_is_null_for_guests_and_401_for_bad_tokens() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);

    let (status, body) = app.get("/api/auth/me", Some("not.a.jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn lesson_completion_round_trips() {
    let app = TestApp::new();
    let root = app.admin("Root").await;
    let ada = app.register("Ada").await;
    let course = app.course(&root, "Rust", 10.0).await;
    let lesson_id = course["lessons"][0]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .post(
            "/api/auth/mark-complete",
            Some(&ada.token),
            json!({ "lessonId": lesson_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completedLessons"], json!([lesson_id]));

    // idempotent
    let (_, body) = app
        .post(
            "/api/auth/mark-complete",
            Some(&ada.token),
            json!({ "lessonId": lesson_id }),
        )
        .await;
    assert_eq!(body["completedLessons"].as_array().unwrap().len(), 1);

    let (status, body) = app
        .post(
            "/api/auth/mark-not-complete",
            Some(&ada.token),
            json!({ "lessonId": lesson_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["completedLessons"], json!([]));

    let (_, me) = app.get("/api/auth/me", Some(&ada.token)).await;
    assert_eq!(me["completedLessons"], json!([]));
}

#[tokio::test]
async fn lesson_progress_requires_auth_and_a_valid_id() {
    let app = TestApp::new();
    let ada = app.register("Ada").await;

    let (status, _) = app
        .post("/api/auth/mark-complete", None, json!({ "lessonId": "x" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .post(
            "/api/auth/mark-complete",
            Some(&ada.token),
            json!({ "lessonId": "not-an-id" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid lesson id");
}

#[tokio::test]
async fn health_and_request_id() {
    let app = TestApp::new();
    let request = http::Request::builder()
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app.router.clone(), request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
}
