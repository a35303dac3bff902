//! Checkout sessions and the payment webhook over HTTP.

mod common;

use common::{paid_checkout_event, TestApp};
use course_market::ports::{PaymentError, PaymentErrorCode};
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn checkout_session_carries_buyer_and_course() {
    let app = TestApp::new();
    let root = app.admin("Root").await;
    let ada = app.register("Ada").await;
    let course = app.course(&root, "Rust", 19.99).await;
    let id = course["id"].as_str().unwrap();

    let (status, body) = app
        .post(
            &format!("/api/courses/{}/checkout-session", id),
            Some(&ada.token),
            json!({}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["url"].as_str().unwrap().starts_with("https://checkout.mock.test/"));

    let requests = app.payments.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.unit_amount, 1999);
    assert_eq!(request.currency, "usd");
    assert_eq!(request.product_name, "Rust");
    assert_eq!(request.user_id.to_string(), ada.id);
    assert_eq!(request.course_id.to_string(), id);
    assert!(request.success_url.contains("{CHECKOUT_SESSION_ID}"));
    assert!(request.cancel_url.ends_with(&format!("/courses/{}", id)));

    // nothing is recorded until payment is confirmed
    let (_, me) = app.get("/api/auth/me", Some(&ada.token)).await;
    assert_eq!(me["enrolledCourses"], json!([]));
}

#[tokio::test]
async fn checkout_requires_auth_and_an_existing_course() {
    let app = TestApp::new();
    let ada = app.register("Ada").await;
    let path = format!("/api/courses/{}/checkout-session", uuid::Uuid::new_v4());

    let (status, _) = app.post(&path, None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.post(&path, Some(&ada.token), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(app.payments.requests().is_empty());
}

#[tokio::test]
async fn provider_failure_is_a_bad_gateway() {
    let app = TestApp::new();
    let root = app.admin("Root").await;
    let ada = app.register("Ada").await;
    let course = app.course(&root, "Rust", 10.0).await;
    app.payments.fail_next(PaymentError::new(
        PaymentErrorCode::ProviderError,
        "stripe is down",
    ));

    let (status, body) = app
        .post(
            &format!("/api/courses/{}/checkout-session", course["id"].as_str().unwrap()),
            Some(&ada.token),
            json!({}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(!body["message"].as_str().unwrap().contains("stripe is down"));
}

#[tokio::test]
async fn replayed_payment_enrolls_exactly_once() {
    let app = TestApp::new();
    let root = app.admin("Root").await;
    let ada = app.register("Ada").await;
    let course = app.course(&root, "Rust", 10.0).await;
    let course_id = course["id"].as_str().unwrap();
    let event = paid_checkout_event(&ada.id, course_id);

    for _ in 0..2 {
        let (status, body) = app.webhook(&event).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "received": true }));
    }

    let (_, me) = app.get("/api/auth/me", Some(&ada.token)).await;
    assert_eq!(me["enrolledCourses"], json!([course_id]));
    let (_, detail) = app.get(&format!("/api/courses/{}", course_id), None).await;
    assert_eq!(detail["enrolledCount"], 1);
}

#[tokio::test]
async fn unsigned_or_missigned_events_enroll_nobody() {
    let app = TestApp::new();
    let root = app.admin("Root").await;
    let ada = app.register("Ada").await;
    let course = app.course(&root, "Rust", 10.0).await;
    let event = paid_checkout_event(&ada.id, course["id"].as_str().unwrap());
    let payload = serde_json::to_vec(&event).unwrap();

    let (status, body) = app.raw_webhook(payload.clone(), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "VALIDATION_FAILED");

    let forged = course_market::domain::billing::sign_payload(
        "whsec_attacker",
        chrono::Utc::now().timestamp(),
        &payload,
    );
    let (status, _) = app.raw_webhook(payload, Some(forged)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, me) = app.get("/api/auth/me", Some(&ada.token)).await;
    assert_eq!(me["enrolledCourses"], json!([]));
}

#[tokio::test]
async fn unrelated_events_are_acknowledged() {
    let app = TestApp::new();
    let event = json!({
        "id": "evt_other",
        "type": "customer.created",
        "created": chrono::Utc::now().timestamp(),
        "data": { "object": { "id": "cus_1" } }
    });

    let (status, body) = app.webhook(&event).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["received"], true);
}

#[tokio::test]
async fn payment_for_a_deleted_course_is_acknowledged() {
    let app = TestApp::new();
    let root = app.admin("Root").await;
    let ada = app.register("Ada").await;
    let course = app.course(&root, "Rust", 10.0).await;
    let course_id = course["id"].as_str().unwrap();
    app.call(
        http::Method::DELETE,
        &format!("/api/admin/courses/{}", course_id),
        Some(&root.token),
        None,
    )
    .await;

    let (status, _) = app.webhook(&paid_checkout_event(&ada.id, course_id)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, me) = app.get("/api/auth/me", Some(&ada.token)).await;
    assert_eq!(me["enrolledCourses"], json!([]));
}

#[tokio::test]
async fn session_without_a_usable_course_is_acknowledged() {
    let app = TestApp::new();
    let ada = app.register("Ada").await;

    let mut missing = paid_checkout_event(&ada.id, "ignored");
    missing["data"]["object"]["metadata"] = json!({ "userId": ada.id });
    let malformed = paid_checkout_event(&ada.id, "not-a-course-id");

    for event in [missing, malformed] {
        let (status, body) = app.webhook(&event).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "received": true }));
    }

    let (_, me) = app.get("/api/auth/me", Some(&ada.token)).await;
    assert_eq!(me["enrolledCourses"], json!([]));
}
