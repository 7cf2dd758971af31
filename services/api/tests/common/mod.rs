//! Shared helpers for the HTTP integration tests
//!
//! Every test gets its own router over a fresh in-memory store and a mailer
//! that keeps messages instead of sending them.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use planetary_api::{
    AppState, create_router,
    jwt::{JwtConfig, JwtService},
    mail::{MailError, Mailer, OutgoingMail},
    schema,
};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Mailer that records outgoing mail
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutgoingMail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

pub fn jwt_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: TEST_SECRET.to_string(),
        ..JwtConfig::default()
    })
    .unwrap()
}

pub fn form_body(fields: &[(&str, &str)]) -> String {
    serde_urlencoded::to_string(fields).unwrap()
}

pub fn earth_fields() -> Vec<(&'static str, &'static str)> {
    vec![
        ("planet_name", "Earth"),
        ("planet_type", "Class M"),
        ("home_star", "Sol"),
        ("mass", "5.972e24"),
        ("radius", "3959"),
        ("distance", "92.96e6"),
    ]
}

pub fn planet_fields(name: &'static str) -> Vec<(&'static str, &'static str)> {
    vec![
        ("planet_name", name),
        ("planet_type", "Class M"),
        ("home_star", "Sol"),
        ("mass", "6.39e23"),
        ("radius", "2106"),
        ("distance", "141.6e6"),
    ]
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
}

impl TestApp {
    pub fn new() -> Self {
        let mailer = Arc::new(RecordingMailer::default());
        let state = AppState::in_memory(jwt_service(), mailer.clone());

        Self {
            router: create_router(state.clone()),
            state,
            mailer,
        }
    }

    /// App with the sample planets and the test user in place
    pub async fn seeded() -> Self {
        let app = Self::new();
        schema::seed(
            app.state.planet_repository.as_ref(),
            app.state.user_repository.as_ref(),
        )
        .await
        .unwrap();
        app
    }

    /// Send a request; JSON bodies are parsed, anything else comes back as a string
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::get(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    pub async fn form(
        &self,
        method: &str,
        uri: &str,
        fields: &[(&str, &str)],
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");

        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = builder.body(Body::from(form_body(fields))).unwrap();
        self.send(request).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::delete(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    /// Log in and return the access token
    pub async fn login(&self, email: &str, password: &str) -> String {
        let (status, body) = self
            .post_json(
                "/login",
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed: {}", body);

        body["access_token"].as_str().unwrap().to_string()
    }

    /// Token for the seeded test user
    pub async fn admin_token(&self) -> String {
        self.login(schema::SEED_USER_EMAIL, schema::SEED_USER_PASSWORD)
            .await
    }

    /// Id of the planet with the given name, as listed by `/planets`
    pub async fn planet_id(&self, name: &str) -> Option<i64> {
        let (_, body) = self.get("/planets").await;
        body.as_array()?
            .iter()
            .find(|p| p["planet_name"] == name)
            .and_then(|p| p["planet_id"].as_i64())
    }
}
