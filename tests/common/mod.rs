//! Shared harness for the HTTP integration tests.
//!
//! Builds the production router over the in-memory store, a real JWT
//! service, a cheap Argon2 hasher and the mock payment provider.

#![allow(dead_code)]

use std::sync::Arc;

use argon2::Params;
use axum::body::Body;
use axum::Router;
use http::{header, Method, Request, StatusCode};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use course_market::adapters::auth::{Argon2PasswordHasher, JwtTokenService, RoleAccessGate};
use course_market::adapters::http::{app_router, AppSettings, AppState};
use course_market::adapters::memory::InMemoryStore;
use course_market::adapters::stripe::MockPaymentProvider;
use course_market::config::ServerConfig;
use course_market::domain::billing::{sign_payload, StripeWebhookVerifier};
use course_market::domain::foundation::UserId;
use course_market::ports::UserRepository;

pub const WEBHOOK_SECRET: &str = "whsec_integration_secret";
pub const PASSWORD: &str = "correct-horse-battery";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryStore>,
    pub payments: MockPaymentProvider,
}

/// A registered account as seen by a client.
pub struct Account {
    pub id: String,
    pub token: String,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_direct_enroll() -> Self {
        Self::with_settings(AppSettings {
            allow_direct_enroll: true,
            ..AppSettings::default()
        })
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let payments = MockPaymentProvider::new();
        let tokens = Arc::new(JwtTokenService::new(
            SecretString::new("integration-signing-secret".to_string()),
            chrono::Duration::hours(24),
        ));
        let cheap = Params::new(1024, 1, 1, None).unwrap();

        let state = AppState {
            users: store.clone(),
            courses: store.clone(),
            enrollments: store.clone(),
            hasher: Arc::new(Argon2PasswordHasher::with_params(cheap)),
            tokens: tokens.clone(),
            sessions: tokens,
            gate: Arc::new(RoleAccessGate::new(store.clone())),
            payments: Arc::new(payments.clone()),
            webhook_verifier: StripeWebhookVerifier::new(WEBHOOK_SECRET),
            settings,
        };

        Self {
            router: app_router(state, &ServerConfig::default()),
            store,
            payments,
        }
    }

    /// Sends one request and returns the status with the JSON body
    /// (`Value::Null` when the body is empty).
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.call(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.call(Method::POST, uri, token, Some(body)).await
    }

    pub async fn register(&self, name: &str) -> Account {
        let (status, body) = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "name": name,
                    "email": format!("{}@example.com", name.to_lowercase()),
                    "password": PASSWORD
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
        Account {
            id: body["user"]["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Registers an account and flips its admin flag directly in the store.
    pub async fn admin(&self, name: &str) -> Account {
        let account = self.register(name).await;
        let id: UserId = account.id.parse().unwrap();
        self.store.set_admin(&id, true).await.unwrap().unwrap();
        account
    }

    /// Creates a course with two lessons through the admin API.
    pub async fn course(&self, admin: &Account, title: &str, price: f64) -> Value {
        let (status, body) = self
            .post(
                "/api/admin/courses",
                Some(&admin.token),
                json!({
                    "title": title,
                    "instructor": "Ferris",
                    "price": price,
                    "lessons": [
                        { "title": "Intro", "order": 1 },
                        { "title": "Ownership", "order": 2 }
                    ]
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create course failed: {}", body);
        body
    }

    /// Delivers a webhook signed with the configured secret.
    pub async fn webhook(&self, payload: &Value) -> (StatusCode, Value) {
        let bytes = serde_json::to_vec(payload).unwrap();
        let signature = sign_payload(WEBHOOK_SECRET, chrono::Utc::now().timestamp(), &bytes);
        self.raw_webhook(bytes, Some(signature)).await
    }

    pub async fn raw_webhook(
        &self,
        payload: Vec<u8>,
        signature: Option<String>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(Method::POST).uri("/webhook");
        if let Some(signature) = signature {
            builder = builder.header("Stripe-Signature", signature);
        }
        self.send(builder.body(Body::from(payload)).unwrap()).await
    }
}

/// A `checkout.session.completed` event for a paid session.
pub fn paid_checkout_event(user_id: &str, course_id: &str) -> Value {
    json!({
        "id": "evt_integration_1",
        "type": "checkout.session.completed",
        "created": chrono::Utc::now().timestamp(),
        "data": {
            "object": {
                "id": "cs_integration_1",
                "payment_status": "paid",
                "client_reference_id": user_id,
                "metadata": { "userId": user_id, "courseId": course_id }
            }
        }
    })
}
