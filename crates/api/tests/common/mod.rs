//! Shared helpers for the HTTP integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use postertrack_api::auth::jwt::generate_access_token;
use postertrack_api::auth::password::hash_password;
use postertrack_api::config::ServerConfig;
use postertrack_api::router::build_app_router;
use postertrack_api::state::AppState;
use postertrack_api::storage::LocalEvidenceStore;
use postertrack_core::roles::Role;
use postertrack_db::models::user::{CreateUser, User};
use postertrack_db::repositories::UserRepo;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Test configuration: fixed JWT secret, uploads in a per-run temp directory.
pub fn test_config() -> ServerConfig {
    let upload_dir = std::env::temp_dir()
        .join(format!("postertrack-test-{}", uuid::Uuid::new_v4()))
        .to_string_lossy()
        .into_owned();
    ServerConfig::from_lookup(move |key| match key {
        "JWT_SECRET" => Some("test-secret-for-integration-tests".into()),
        "HOST" => Some("127.0.0.1".into()),
        "PORT" => Some("0".into()),
        "UPLOAD_DIR" => Some(upload_dir.clone()),
        "PUBLIC_BASE_URL" => Some("http://test.local/uploads".into()),
        _ => None,
    })
    .unwrap()
}

/// The production router over `pool`, with email disabled.
pub fn build_test_app(pool: PgPool) -> Router {
    let upload_dir = test_config().upload_dir;
    build_test_app_with_uploads(pool, upload_dir)
}

/// Like [`build_test_app`], but evidence photos land in `upload_dir`.
pub fn build_test_app_with_uploads(pool: PgPool, upload_dir: impl Into<PathBuf>) -> Router {
    let mut config = test_config();
    config.upload_dir = upload_dir.into();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        email: None,
        evidence: Arc::new(LocalEvidenceStore::new(
            config.upload_dir.clone(),
            config.public_base_url.clone(),
        )),
    };
    build_app_router(state, &config)
}

/// Number of files under `dir`; a missing directory counts as empty.
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Users and tokens
// ---------------------------------------------------------------------------

pub fn new_user(email: &str, role: Role) -> CreateUser {
    CreateUser {
        email: email.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        role,
        firstname: Some("Test".into()),
        lastname: Some("User".into()),
        name: None,
        phone: None,
        address: None,
        states_covered: Vec::new(),
        additional_emails: Vec::new(),
        industry: None,
    }
}

pub async fn create_user(pool: &PgPool, email: &str, role: Role) -> User {
    UserRepo::create(pool, &new_user(email, role)).await.unwrap()
}

pub async fn create_auditor(pool: &PgPool, email: &str, states: &[&str]) -> User {
    let mut input = new_user(email, Role::FieldAuditor);
    input.states_covered = states.iter().map(|s| s.to_string()).collect();
    UserRepo::create(pool, &input).await.unwrap()
}

/// A bearer token for `user`, signed with the test secret.
pub fn token_for(user: &User) -> String {
    generate_access_token(user.id, &user.role, &test_config().jwt).unwrap()
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn json_request(method: Method, uri: &str, body: &Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, None)).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::POST, uri, &body, Some(token))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, json_request(Method::PATCH, uri, &body, Some(token))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    form: MultipartForm,
    token: &str,
) -> Response<Body> {
    let (content_type, body) = form.finish();
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

/// Minimal `multipart/form-data` encoder. Parts keep insertion order.
pub struct MultipartForm {
    boundary: &'static str,
    body: Vec<u8>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: "postertrack-test-boundary",
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        let head = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n",
            self.boundary
        );
        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn file(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        let head = format!(
            "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n\r\n",
            self.boundary
        );
        self.body.extend_from_slice(head.as_bytes());
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (
            format!("multipart/form-data; boundary={}", self.boundary),
            self.body,
        )
    }
}

/// A tiny valid PNG.
pub fn png_bytes() -> Vec<u8> {
    let img = image::RgbImage::new(3, 2);
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}
