//! Test harness driving the full router in memory.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so no socket is bound and
//! the pipeline only ever sees a `MockFetcher`. Each request carries a
//! `ConnectInfo` peer address, as `into_make_service_with_connect_info` would
//! provide.

use std::net::SocketAddr;

use axum::{
    body::{to_bytes, Body},
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use ingestion::{testing::MockFetcher, Fetcher, Pipeline, SecretString};
use serde_json::Value;
use server_core::{
    domains::auth::{AdminPassword, JwtService},
    server::{build_app, AppState},
};
use tower::ServiceExt;

pub const ADMIN_PASSWORD: &str = "test-admin-password";
pub const JWT_SECRET: &str = "test_secret_key";
pub const JWT_ISSUER: &str = "portfolio";

/// Peer address used when a test does not pick one.
pub const DEFAULT_PEER: ([u8; 4], u16) = ([203, 0, 113, 9], 40000);

/// JSON response as status and parsed body (`Value::Null` when empty).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct TestHarness {
    pub state: AppState,
    router: Router,
}

impl TestHarness {
    /// Harness whose pipeline fetches nothing.
    pub fn new() -> Self {
        Self::with_fetcher(MockFetcher::new())
    }

    pub fn with_fetcher(fetcher: impl Fetcher + 'static) -> Self {
        Self::build(fetcher, false)
    }

    /// Harness with the login rate limit switched on.
    pub fn with_rate_limit() -> Self {
        Self::build(MockFetcher::new(), true)
    }

    fn build(fetcher: impl Fetcher + 'static, rate_limit_enabled: bool) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let state = AppState::new(
            Pipeline::builder(fetcher).build(),
            JwtService::new(JWT_SECRET, JWT_ISSUER.to_string()),
            AdminPassword::new(&SecretString::from(ADMIN_PASSWORD)),
        );
        let router = build_app(state.clone(), vec![], rate_limit_enabled);

        Self { state, router }
    }

    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        self.request_from(SocketAddr::from(DEFAULT_PEER), method, path, body, token)
            .await
    }

    /// Send a request as if it came from `peer`.
    pub async fn request_from(
        &self,
        peer: SocketAddr,
        method: Method,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .extension(ConnectInfo(peer));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, None, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request(Method::POST, path, Some(body), None).await
    }

    /// Log in with the admin password and return the bearer token.
    pub async fn admin_token(&self) -> String {
        let response = self
            .post("/api/auth/login", serde_json::json!({ "password": ADMIN_PASSWORD }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);
        response.body["token"].as_str().unwrap().to_string()
    }
}
