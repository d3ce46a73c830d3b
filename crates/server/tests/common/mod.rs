#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

use server::routes;
use server::state::AppState;
use service::auth::repository::mock::MockAuthRepository;
use service::auth::repository::AuthRepository;
use service::auth::service::TokenConfig;
use service::auth::AuthService;
use service::probe::mock::MockProbe;
use service::probe::{ContentProbe, ProbeGate};
use service::tracker::repository::mock::MockTrackerRepository;
use service::tracker::repository::TrackerRepository;

pub const TEST_SECRET: &str = "test-secret";

/// In-process app over mock collaborators; no database or browser needed.
pub struct TestApp {
    pub router: Router,
    pub users: Arc<MockAuthRepository>,
    pub gate: Arc<ProbeGate>,
}

pub fn build_app() -> TestApp {
    build_app_with_probe(Arc::new(MockProbe::ok("Hi")))
}

pub fn build_app_with_probe(probe: Arc<dyn ContentProbe>) -> TestApp {
    let users = Arc::new(MockAuthRepository::default());
    let users_dyn: Arc<dyn AuthRepository> = users.clone();
    let auth = Arc::new(AuthService::new(
        Arc::clone(&users_dyn),
        TokenConfig::new(TEST_SECRET, 7),
    ));
    let trackers: Arc<dyn TrackerRepository> = Arc::new(MockTrackerRepository::default());
    let gate = Arc::new(ProbeGate::new(probe, 2, Duration::from_secs(5)));
    let state = AppState {
        auth,
        users: users_dyn,
        trackers,
        probe: Arc::clone(&gate),
    };
    let router = routes::build_router(CorsLayer::very_permissive(), state);
    TestApp { router, users, gate }
}

impl TestApp {
    pub async fn call(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    pub async fn post_json(&self, uri: &str, token: Option<&str>, body: &Value) -> Response {
        self.call(json_request("POST", uri, token, body)).await
    }

    pub async fn put_json(&self, uri: &str, token: Option<&str>, body: &Value) -> Response {
        self.call(json_request("PUT", uri, token, body)).await
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.call(bare_request("GET", uri, token)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> Response {
        self.call(bare_request("DELETE", uri, token)).await
    }

    /// Signs up a fresh user and returns their session token.
    pub async fn signup(&self, email: &str) -> String {
        let resp = self
            .post_json(
                "/user/signup",
                None,
                &json!({"fullName": "Tester", "email": email, "password": "hunter22"}),
            )
            .await;
        assert_eq!(resp.status(), 200, "signup failed for {email}");
        read_json(resp).await["token"].as_str().unwrap().to_string()
    }
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(serde_json::to_vec(body).unwrap())).unwrap()
}

pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn read_json(resp: Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
