use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use clap::Parser;
use serde::{de::DeserializeOwned, Serialize};
use server::{cli::Cli, db, routes, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

/// Router backed by a freshly migrated database in a temp dir. The database
/// is removed when this is dropped.
pub struct TestApp {
    router: Router,
    _dir: TempDir,
}

impl TestApp {
    pub fn new() -> Self {
        shared::configure_tracing_once();

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("barbell.sqlite");
        let path = path.to_str().expect("Temp path isn't utf8");

        db::run_migrations(path).expect("Failed to run migrations");
        let pool = db::create_pool(path).expect("Failed to create pool");

        // Minimum bcrypt cost keeps the tests fast
        let args = Cli::parse_from(["server", "--bcrypt-cost", "4", "--sqlite-connection-string", path]);
        let router = routes::router(AppState::new(pool, args)).expect("Failed to build router");

        Self { router, _dir: dir }
    }

    pub fn get(&self, uri: impl Into<String>) -> TestRequest {
        TestRequest::new(self.router.clone(), Method::GET, uri.into())
    }

    pub fn post(&self, uri: impl Into<String>) -> TestRequest {
        TestRequest::new(self.router.clone(), Method::POST, uri.into())
    }

    pub fn put(&self, uri: impl Into<String>) -> TestRequest {
        TestRequest::new(self.router.clone(), Method::PUT, uri.into())
    }

    pub fn patch(&self, uri: impl Into<String>) -> TestRequest {
        TestRequest::new(self.router.clone(), Method::PATCH, uri.into())
    }

    pub fn delete(&self, uri: impl Into<String>) -> TestRequest {
        TestRequest::new(self.router.clone(), Method::DELETE, uri.into())
    }
}

pub struct TestRequest {
    router: Router,
    method: Method,
    uri: String,
    body: Option<String>,
}

impl TestRequest {
    fn new(router: Router, method: Method, uri: String) -> Self {
        Self {
            router,
            method,
            uri,
            body: None,
        }
    }

    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = Some(serde_json::to_string(data).expect("Failed to serialize JSON"));
        self
    }

    pub async fn send(self) -> TestResponse {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if self.body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(Body::from(self.body.unwrap_or_default()))
            .expect("Failed to build request");

        let response = self
            .router
            .oneshot(request)
            .await
            .expect("Failed to execute request");

        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body")
            .to_vec();

        TestResponse { status, body }
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Failed to parse response body as JSON: {e}\n{}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    #[track_caller]
    pub fn assert_status(&self, status: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            status,
            "Unexpected status, body: {}",
            String::from_utf8_lossy(&self.body)
        );
        self
    }
}
