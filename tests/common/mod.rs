#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use tocket_server::config::Config;
use tocket_server::db;
use tocket_server::routes::create_routes;
use tocket_server::state::AppState;

pub const INDEX_HTML: &str = "<!doctype html><title>tocket</title>";
pub const MULTIPART_BOUNDARY: &str = "tocket-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub config: Config,
    _dir: TempDir,
}

/// Router backed by a fresh SQLite file, uploads dir and frontend bundle in a temp dir.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().expect("failed to create temp dir");

    let frontend_dir = dir.path().join("dist");
    std::fs::create_dir_all(frontend_dir.join("assets")).expect("failed to create bundle");
    std::fs::write(frontend_dir.join("index.html"), INDEX_HTML).expect("index.html");
    std::fs::write(frontend_dir.join("assets/app.js"), "console.log('tocket');").expect("app.js");
    std::fs::write(frontend_dir.join("favicon.ico"), [0u8, 0, 1, 0]).expect("favicon");

    let config = Config {
        database_url: format!("sqlite://{}", dir.path().join("tickets.db").display()),
        uploads_dir: dir.path().join("uploads"),
        frontend_dir,
        max_upload_bytes: 64 * 1024,
        ..Config::default()
    };

    let pool = db::initialize(&config)
        .await
        .expect("failed to initialize database");
    let router = create_routes(AppState::new(pool, config.clone()));

    TestApp {
        router,
        config,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn response(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .unwrap_or_else(|err| match err {})
    }

    pub async fn request(&self, request: Request<Body>) -> (StatusCode, Vec<u8>) {
        let response = self.response(request).await;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("failed to read response body");
        (status, bytes.to_vec())
    }

    pub async fn json(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, bytes) = self.request(request).await;
        let body = serde_json::from_slice(&bytes).unwrap_or_else(|err| {
            panic!(
                "response body is not JSON: {err}; body={}",
                String::from_utf8_lossy(&bytes)
            )
        });
        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.json(empty_request(Method::GET, uri)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.json(empty_request(Method::DELETE, uri)).await
    }

    pub async fn send_json(&self, method: Method, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.json(json_request(method, uri, body.to_string())).await
    }

    /// Creates a ticket and returns its response body.
    pub async fn create_ticket(&self, body: Value) -> Value {
        let (status, created) = self.send_json(Method::POST, "/api/tickets", &body).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
        created
    }
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn json_request(method: Method, uri: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("failed to build request")
}

/// A `multipart/form-data` request with a single file part.
pub fn multipart_request(field: &str, filename: &str, contents: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri("/api/tickets/upload")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("failed to build request")
}

pub fn sample_ticket(title: &str) -> Value {
    serde_json::json!({
        "title": title,
        "description": "Two seats, balcony",
        "eventTime": "2025-03-14T19:30:00Z",
        "location": "Royal Albert Hall",
        "imagePath": "",
        "tags": "music,classical",
    })
}
